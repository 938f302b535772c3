//! List rows shown by the dashboard screens
//!
//! These are display records: fields are kept as the strings the screens
//! render, and only the fields that search and status filtering look at are
//! exposed through [`Searchable`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::filter::Searchable;

/// A CRM lead
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub status: String,
    pub source: String,
    pub date_added: NaiveDate,
}

impl Searchable for Lead {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.company.as_str(),
            self.email.as_str(),
            self.status.as_str(),
            self.source.as_str(),
        ]
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

/// Business development manager attached to a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BdmAssignment {
    pub id: String,
    pub name: String,
    pub commission: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub contact_person: String,
    pub billing_address: String,
    pub shipping_address: String,
    pub bdm: Option<BdmAssignment>,
    pub projects: u32,
    pub total_billed: String,
}

impl Searchable for Client {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.contact_person.as_str()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub client: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
    pub value: String,
}

impl Searchable for Project {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.client.as_str()]
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub client: String,
    pub project: String,
    pub amount: String,
    pub tax: String,
    pub total: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: String,
    #[serde(default)]
    pub recurring: bool,
}

impl Searchable for Invoice {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.client.as_str(), self.project.as_str()]
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

/// A client payment against an invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub invoice_id: String,
    pub client: String,
    pub amount: String,
    pub date: NaiveDate,
    pub method: String,
    pub status: String,
    #[serde(default)]
    pub notes: String,
}

impl Searchable for Payment {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.invoice_id.as_str(),
            self.client.as_str(),
            self.method.as_str(),
        ]
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

/// Commission owed to a business development manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BdmPayment {
    pub id: String,
    pub bdm_name: String,
    pub client: String,
    pub amount: String,
    pub date: NaiveDate,
    pub commission_rate: String,
    pub invoice_id: String,
    pub is_paid: bool,
}

impl Searchable for BdmPayment {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.bdm_name.as_str(),
            self.client.as_str(),
            self.invoice_id.as_str(),
        ]
    }

    fn status(&self) -> Option<&str> {
        Some(if self.is_paid { "paid" } else { "unpaid" })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryDetails {
    pub amount: String,
    pub bank_name: String,
    pub account_no: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub project: String,
    pub client: String,
    pub spoc: String,
    pub status: String,
    pub salary_details: Option<SalaryDetails>,
}

impl Searchable for Candidate {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_str(),
            self.client.as_str(),
            self.project.as_str(),
        ]
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTemplate {
    pub id: String,
    pub name: String,
    /// File format, e.g. PDF or DOCX
    pub kind: String,
    pub created_at: NaiveDate,
    pub current_version: String,
    pub last_updated: NaiveDate,
    #[serde(default)]
    pub variables: Vec<String>,
}

impl Searchable for DocumentTemplate {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.kind.as_str()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDocument {
    pub id: String,
    pub name: String,
    pub template: String,
    pub client: String,
    pub generated_date: NaiveDate,
    pub created_by: String,
}

impl Searchable for GeneratedDocument {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.template.as_str(),
            self.client.as_str(),
            self.created_by.as_str(),
        ]
    }
}

/// Entry of the role master list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    pub description: String,
}

impl Searchable for Role {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }
}

/// Every list the dashboard renders
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordSet {
    pub leads: Vec<Lead>,
    pub clients: Vec<Client>,
    pub projects: Vec<Project>,
    pub invoices: Vec<Invoice>,
    pub payments: Vec<Payment>,
    pub bdm_payments: Vec<BdmPayment>,
    pub candidates: Vec<Candidate>,
    pub document_templates: Vec<DocumentTemplate>,
    pub generated_documents: Vec<GeneratedDocument>,
    pub roles: Vec<Role>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bdm_payment_status_from_flag() {
        let mut payment = BdmPayment {
            id: "BDM-2023-003".to_string(),
            bdm_name: "Michael Brown".to_string(),
            client: "Globex Inc.".to_string(),
            amount: "$1,275".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 3, 5).unwrap(),
            commission_rate: "4.5%".to_string(),
            invoice_id: "INV-2023-002".to_string(),
            is_paid: false,
        };
        assert_eq!(payment.status(), Some("unpaid"));

        payment.is_paid = true;
        assert_eq!(payment.status(), Some("paid"));
    }

    #[test]
    fn test_record_set_defaults_missing_lists() {
        let set: RecordSet = serde_json::from_str(
            r#"{"roles":[{"name":"USER","description":"Specific access"}]}"#,
        )
        .unwrap();

        assert_eq!(set.roles.len(), 1);
        assert!(set.leads.is_empty());
        assert!(set.invoices.is_empty());
    }
}
