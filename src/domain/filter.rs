use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::records::Project;

/// A list row that can be matched by the search box and the status filter
pub trait Searchable {
    /// Fields the free-text search looks at
    fn search_fields(&self) -> Vec<&str>;

    /// Status shown in the row badge, if the list has one
    fn status(&self) -> Option<&str> {
        None
    }
}

/// Status dropdown selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum StatusFilter {
    #[default]
    All,
    Only(String),
}

impl StatusFilter {
    fn admits(&self, status: Option<&str>) -> bool {
        match self {
            Self::All => true,
            // Same folding as the search box, so non-ASCII statuses match too
            Self::Only(wanted) => {
                let wanted = wanted.to_lowercase();
                status.is_some_and(|s| s.to_lowercase() == wanted)
            }
        }
    }
}

impl FromStr for StatusFilter {
    type Err = std::convert::Infallible;

    /// `"all"` (any case) or an empty string selects every row
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            Ok(StatusFilter::Only(trimmed.to_string()))
        }
    }
}

/// View state of one list screen
///
/// Owned by whoever renders the screen and handed to the filtering
/// functions; nothing here is shared between screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub search: String,
    pub status: StatusFilter,
    /// 1-based
    pub page: usize,
    pub per_page: usize,
}

impl ViewState {
    pub const DEFAULT_PER_PAGE: usize = 10;

    pub fn new() -> Self {
        Self {
            search: String::new(),
            status: StatusFilter::All,
            page: 1,
            per_page: Self::DEFAULT_PER_PAGE,
        }
    }

    /// Sets the search term and jumps back to the first page
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self.page = 1;
        self
    }

    /// Sets the status filter and jumps back to the first page
    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self.page = 1;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page;
        self
    }

    fn matches<T: Searchable>(&self, record: &T, term: &str) -> bool {
        let text_matches = term.is_empty()
            || record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(term));

        text_matches && self.status.admits(record.status())
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the records visible under the given view state, in input order
///
/// Search is a case-insensitive substring match against any of the
/// record's search fields.
///
/// # Examples
/// ```
/// use dealflow_core::domain::filter::{filter_records, Searchable, ViewState};
///
/// struct Row(&'static str);
///
/// impl Searchable for Row {
///     fn search_fields(&self) -> Vec<&str> {
///         vec![self.0]
///     }
/// }
///
/// let rows = vec![Row("Acme Corporation"), Row("Globex Inc.")];
/// let visible = filter_records(&rows, &ViewState::new().with_search("ACME"));
/// assert_eq!(visible.len(), 1);
/// ```
pub fn filter_records<'a, T: Searchable>(records: &'a [T], view: &ViewState) -> Vec<&'a T> {
    let term = view.search.to_lowercase();
    records
        .iter()
        .filter(|record| view.matches(*record, &term))
        .collect()
}

/// Filters the projects list of the clients screen
///
/// Selecting a client narrows the list to that client's projects and the
/// search box no longer applies.
pub fn filter_projects<'a>(
    projects: &'a [Project],
    view: &ViewState,
    selected_client: Option<&str>,
) -> Vec<&'a Project> {
    match selected_client {
        Some(client) => projects.iter().filter(|p| p.client == client).collect(),
        None => filter_records(projects, view),
    }
}

/// One page of a filtered list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1 && self.total_pages > 0
    }
}

/// Cuts the page selected by `view` out of `items`
///
/// A page past the end yields no items; a `per_page` of zero is treated
/// as the default page size.
pub fn paginate<T: Clone>(items: &[T], view: &ViewState) -> Page<T> {
    let per_page = if view.per_page == 0 {
        ViewState::DEFAULT_PER_PAGE
    } else {
        view.per_page
    };
    let page = view.page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);

    let start = (page - 1).saturating_mul(per_page);
    let page_items = items
        .iter()
        .skip(start)
        .take(per_page)
        .cloned()
        .collect();

    Page {
        items: page_items,
        page,
        total_pages,
        total_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::records::{BdmPayment, Invoice, Lead, Role};
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 4, 1).unwrap()
    }

    fn lead(name: &str, company: &str, status: &str, source: &str) -> Lead {
        Lead {
            id: name.to_lowercase(),
            name: name.to_string(),
            company: company.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            phone: "+1 (555) 123-4567".to_string(),
            status: status.to_string(),
            source: source.to_string(),
            date_added: date(),
        }
    }

    fn invoice(id: &str, client: &str, status: &str) -> Invoice {
        Invoice {
            id: id.to_string(),
            client: client.to_string(),
            project: "Website Redesign".to_string(),
            amount: "$12,500".to_string(),
            tax: "$2,250".to_string(),
            total: "$14,750".to_string(),
            issue_date: date(),
            due_date: date(),
            status: status.to_string(),
            recurring: false,
        }
    }

    fn project(name: &str, client: &str) -> Project {
        Project {
            id: name.to_lowercase(),
            name: name.to_string(),
            client: client.to_string(),
            start_date: date(),
            end_date: date(),
            status: "Completed".to_string(),
            value: "$24,500".to_string(),
        }
    }

    fn leads() -> Vec<Lead> {
        vec![
            lead("John Smith", "Tech Solutions Inc.", "New", "Website"),
            lead("Sarah Johnson", "Digital Innovations", "Contacted", "Referral"),
            lead("Robert Wilson", "GrowthCorp", "Qualified", "Trade Show"),
            lead("Maria Garcia", "InnoTech Solutions", "New", "LinkedIn"),
        ]
    }

    fn names(rows: &[&Lead]) -> Vec<String> {
        rows.iter().map(|l| l.name.clone()).collect()
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let rows = leads();
        assert_eq!(filter_records(&rows, &ViewState::new()).len(), 4);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let rows = leads();

        let visible = filter_records(&rows, &ViewState::new().with_search("SOLUTIONS"));
        assert_eq!(names(&visible), vec!["John Smith", "Maria Garcia"]);

        let visible = filter_records(&rows, &ViewState::new().with_search("trade"));
        assert_eq!(names(&visible), vec!["Robert Wilson"]);

        let visible = filter_records(&rows, &ViewState::new().with_search("nobody"));
        assert!(visible.is_empty());
    }

    #[test]
    fn test_search_only_looks_at_search_fields() {
        let rows = leads();
        // Phone numbers are not searchable
        let visible = filter_records(&rows, &ViewState::new().with_search("555"));
        assert!(visible.is_empty());
    }

    #[test]
    fn test_status_filter_combines_with_search() {
        let rows = vec![
            invoice("INV-2023-001", "Acme Corporation", "Paid"),
            invoice("INV-2023-002", "Globex Inc.", "Pending"),
            invoice("INV-2023-005", "Acme Corporation", "Paid"),
        ];

        let view = ViewState::new().with_status("paid".parse().unwrap());
        assert_eq!(filter_records(&rows, &view).len(), 2);

        let view = view.with_search("005");
        let visible = filter_records(&rows, &view);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "INV-2023-005");

        let view = ViewState::new().with_status("All".parse().unwrap());
        assert_eq!(filter_records(&rows, &view).len(), 3);
    }

    #[test]
    fn test_status_filter_excludes_rows_without_status() {
        let rows = vec![Role {
            name: "USER".to_string(),
            description: "Specific access".to_string(),
        }];

        let view = ViewState::new().with_status(StatusFilter::Only("active".to_string()));
        assert!(filter_records(&rows, &view).is_empty());
    }

    #[test]
    fn test_status_filter_folds_non_ascii_case() {
        let rows = vec![
            invoice("INV-2023-010", "Société Générale", "ÉCHU"),
            invoice("INV-2023-011", "Globex Inc.", "Payé"),
        ];

        let view = ViewState::new().with_status("échu".parse().unwrap());
        let visible = filter_records(&rows, &view);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "INV-2023-010");

        let view = ViewState::new().with_search("SOCIÉTÉ");
        assert_eq!(filter_records(&rows, &view).len(), 1);
    }

    #[test]
    fn test_bdm_paid_filter() {
        let payment = |id: &str, is_paid: bool| BdmPayment {
            id: id.to_string(),
            bdm_name: "Sarah Johnson".to_string(),
            client: "Acme Corporation".to_string(),
            amount: "$295".to_string(),
            date: date(),
            commission_rate: "5%".to_string(),
            invoice_id: "INV-2023-005".to_string(),
            is_paid,
        };
        let rows = vec![payment("BDM-1", true), payment("BDM-2", false)];

        let view = ViewState::new().with_status("unpaid".parse().unwrap());
        let unpaid = filter_records(&rows, &view);
        assert_eq!(unpaid.len(), 1);
        assert_eq!(unpaid[0].id, "BDM-2");
    }

    #[test]
    fn test_selected_client_overrides_search() {
        let rows = vec![
            project("Website Redesign", "Acme Corporation"),
            project("ERP Implementation", "Globex Inc."),
            project("Mobile App Development", "Acme Corporation"),
        ];
        let view = ViewState::new().with_search("erp");

        assert_eq!(filter_projects(&rows, &view, None).len(), 1);

        let visible = filter_projects(&rows, &view, Some("Acme Corporation"));
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|p| p.client == "Acme Corporation"));
    }

    #[test]
    fn test_new_search_resets_page() {
        let view = ViewState::new().with_page(3).with_search("acme");
        assert_eq!(view.page, 1);
    }

    #[test]
    fn test_paginate() {
        let items: Vec<u32> = (1..=23).collect();

        let first = paginate(&items, &ViewState::new());
        assert_eq!(first.items, (1..=10).collect::<Vec<_>>());
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_items, 23);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let last = paginate(&items, &ViewState::new().with_page(3));
        assert_eq!(last.items, vec![21, 22, 23]);
        assert!(!last.has_next());
        assert!(last.has_previous());

        let beyond = paginate(&items, &ViewState::new().with_page(9));
        assert!(beyond.items.is_empty());
    }

    #[test]
    fn test_paginate_edge_cases() {
        let empty: Vec<u32> = Vec::new();
        let page = paginate(&empty, &ViewState::new());
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
        assert!(!page.has_next());

        let items: Vec<u32> = (1..=5).collect();
        let page = paginate(&items, &ViewState::new().with_per_page(0).with_page(0));
        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 5);
    }
}
