use serde::{Deserialize, Serialize};

/// Columns of the contact table, under the store's column names.
///
/// `name` is left out of the request body when `None`, so an update without a
/// name keeps the stored one. The other optional columns serialize as `null`
/// and overwrite whatever was stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "Email", default)]
    pub email: String,
    #[serde(rename = "Phone", default)]
    pub phone: Option<String>,
    #[serde(rename = "LinkedIn", default)]
    pub linkedin: Option<String>,
    #[serde(rename = "Account", default)]
    pub account: Option<String>,
    #[serde(rename = "Company website", default)]
    pub company_website: Option<String>,
}

/// A contact as held by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: String,
    pub fields: ContactFields,
}

/// Lead pushed to the outreach tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachLead {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub company_name: Option<String>,
}

/// Contact upserted into the marketing CRM, keyed by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmContact {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_without_name_omit_the_column() {
        let fields = ContactFields {
            name: None,
            email: "ada@example.com".into(),
            phone: None,
            ..Default::default()
        };

        let json = serde_json::to_value(&fields).unwrap();
        assert!(json.get("Name").is_none());
        assert_eq!(json["Email"], "ada@example.com");
        // Absent values are written as null so the stored value is cleared
        assert!(json["Phone"].is_null());
        assert!(json.get("Company website").is_some());
    }

    #[test]
    fn test_fields_parse_partial_store_rows() {
        let fields: ContactFields =
            serde_json::from_str(r#"{"Email":"ada@example.com","Name":"Ada"}"#).unwrap();
        assert_eq!(fields.name.as_deref(), Some("Ada"));
        assert!(fields.account.is_none());
    }

    #[test]
    fn test_outreach_lead_wire_names() {
        let lead = OutreachLead {
            email: "ada@example.com".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            company_name: Some("Example Ltd".into()),
        };
        let json = serde_json::to_value(&lead).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["companyName"], "Example Ltd");
    }
}
