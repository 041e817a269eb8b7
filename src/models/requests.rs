use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::MatchQuery;
use crate::models::domain::Role;

/// Request to resolve matches for a selected company
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResolveMatchesRequest {
    pub role: Role,
    #[validate(length(min = 1))]
    #[serde(alias = "company_name", rename = "companyName")]
    pub company_name: String,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    #[serde(alias = "max_distance_miles", rename = "maxDistanceMiles")]
    pub max_distance_miles: Option<f64>,
}

impl ResolveMatchesRequest {
    pub fn to_query(&self) -> MatchQuery {
        MatchQuery {
            role: self.role,
            company_name: self.company_name.clone(),
            keyword: self.keyword.clone(),
            max_distance_miles: self.max_distance_miles,
        }
    }
}

/// Query string for the company list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompaniesQuery {
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_both_spellings() {
        let camel: ResolveMatchesRequest = serde_json::from_str(
            r#"{"role":"buyer","companyName":"Corner Grocer","maxDistanceMiles":50}"#,
        )
        .unwrap();
        let snake: ResolveMatchesRequest = serde_json::from_str(
            r#"{"role":"producer","company_name":"Hen House","keyword":"eggs"}"#,
        )
        .unwrap();

        assert_eq!(camel.role, Role::Buyer);
        assert_eq!(camel.max_distance_miles, Some(50.0));
        assert_eq!(snake.role, Role::Producer);
        assert_eq!(snake.keyword.as_deref(), Some("eggs"));
        assert!(snake.max_distance_miles.is_none());
    }

    #[test]
    fn test_empty_company_name_fails_validation() {
        let request = ResolveMatchesRequest {
            role: Role::Buyer,
            company_name: String::new(),
            keyword: None,
            max_distance_miles: None,
        };

        assert!(request.validate().is_err());
    }
}
