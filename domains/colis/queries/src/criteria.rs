use colis_models::{Colis, ColisStatus, Priority};
use serde::Deserialize;

/// Optional filters accepted when searching packages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ColisCriteria {
    pub status: Option<ColisStatus>,
    pub zone_id: Option<String>,
    pub city: Option<String>,
    pub priority: Option<Priority>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColisClause {
    StatusEq(ColisStatus),
    /// Needs the package to be joined with its zone.
    ZoneIdEq(String),
    /// Needle is stored lower-cased.
    CityContains(String),
    PriorityEq(Priority),
}

impl ColisClause {
    pub fn matches(&self, colis: &Colis) -> bool {
        match self {
            Self::StatusEq(status) => colis.status == *status,
            Self::ZoneIdEq(zone_id) => {
                colis
                    .zone_id
                    .is_some_and(|id| id.to_string() == *zone_id)
            }
            Self::CityContains(needle) => {
                colis.destination_city.to_lowercase().contains(needle.as_str())
            }
            Self::PriorityEq(priority) => colis.priority == *priority,
        }
    }
}

/// Conjunction of clauses; an empty predicate matches every package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColisPredicate {
    clauses: Vec<ColisClause>,
}

impl ColisPredicate {
    pub fn clauses(&self) -> &[ColisClause] { &self.clauses }

    pub fn is_empty(&self) -> bool { self.clauses.is_empty() }

    pub fn requires_zone_join(&self) -> bool {
        self.clauses
            .iter()
            .any(|clause| matches!(clause, ColisClause::ZoneIdEq(_)))
    }

    pub fn matches(&self, colis: &Colis) -> bool {
        self.clauses.iter().all(|clause| clause.matches(colis))
    }
}

impl ColisCriteria {
    pub fn new(
        status: Option<ColisStatus>, zone_id: Option<String>,
        city: Option<String>, priority: Option<Priority>,
    ) -> Self {
        Self {
            status,
            zone_id,
            city,
            priority,
        }
    }

    /// Turns the present filters into a predicate. Blank strings count as
    /// absent; values are otherwise taken as-is.
    pub fn to_predicate(&self) -> ColisPredicate {
        let mut clauses = Vec::with_capacity(4);

        if let Some(status) = self.status {
            clauses.push(ColisClause::StatusEq(status));
        }

        if let Some(zone_id) = non_blank(self.zone_id.as_deref()) {
            clauses.push(ColisClause::ZoneIdEq(zone_id.to_string()));
        }

        if let Some(city) = non_blank(self.city.as_deref()) {
            clauses.push(ColisClause::CityContains(city.to_lowercase()));
        }

        if let Some(priority) = self.priority {
            clauses.push(ColisClause::PriorityEq(priority));
        }

        ColisPredicate { clauses }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn colis(city: &str, status: ColisStatus, priority: Priority) -> Colis {
        Colis {
            id: Uuid::now_v7(),
            description: "Books".to_string(),
            weight_kg: 2.5,
            destination_city: city.to_string(),
            destination_address: "1 rue de la Paix".to_string(),
            status,
            priority,
            zone_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_no_filters_matches_everything() {
        let predicate = ColisCriteria::default().to_predicate();

        assert!(predicate.is_empty());
        assert!(!predicate.requires_zone_join());
        for status in ColisStatus::ALL {
            assert!(predicate.matches(&colis("Lyon", status, Priority::Low)));
        }
    }

    #[test]
    fn test_city_is_case_insensitive_substring() {
        let criteria =
            ColisCriteria::new(None, None, Some("par".to_string()), None);
        let predicate = criteria.to_predicate();

        assert!(predicate.matches(&colis(
            "Paris",
            ColisStatus::Created,
            Priority::Normal
        )));
        assert!(predicate.matches(&colis(
            "SAINT-PARDOUX",
            ColisStatus::Created,
            Priority::Normal
        )));
        assert!(!predicate.matches(&colis(
            "Lyon",
            ColisStatus::Created,
            Priority::Normal
        )));
    }

    #[test]
    fn test_upper_case_needle_is_lowered() {
        let criteria =
            ColisCriteria::new(None, None, Some("PAR".to_string()), None);

        assert_eq!(
            criteria.to_predicate().clauses(),
            &[ColisClause::CityContains("par".to_string())]
        );
    }

    #[test]
    fn test_zone_clause_requires_join() {
        let zone_id = Uuid::now_v7();
        let criteria =
            ColisCriteria::new(None, Some(zone_id.to_string()), None, None);
        let predicate = criteria.to_predicate();

        assert!(predicate.requires_zone_join());
        assert_eq!(
            predicate.clauses(),
            &[ColisClause::ZoneIdEq(zone_id.to_string())]
        );

        let mut inside = colis("Paris", ColisStatus::InStock, Priority::High);
        inside.zone_id = Some(zone_id);
        let outside = colis("Paris", ColisStatus::InStock, Priority::High);

        assert!(predicate.matches(&inside));
        assert!(!predicate.matches(&outside));
    }

    #[test]
    fn test_blank_strings_add_no_clause() {
        let criteria = ColisCriteria::new(
            None,
            Some("   ".to_string()),
            Some(String::new()),
            None,
        );
        let predicate = criteria.to_predicate();

        assert!(predicate.is_empty());
        assert!(!predicate.requires_zone_join());
    }

    #[test]
    fn test_filters_combine_with_and() {
        let criteria = ColisCriteria::new(
            Some(ColisStatus::InTransit),
            None,
            Some("lyon".to_string()),
            Some(Priority::Urgent),
        );
        let predicate = criteria.to_predicate();

        assert_eq!(predicate.clauses().len(), 3);
        assert!(predicate.matches(&colis(
            "Lyon",
            ColisStatus::InTransit,
            Priority::Urgent
        )));
        // each record below satisfies only some of the clauses
        assert!(!predicate.matches(&colis(
            "Lyon",
            ColisStatus::Delivered,
            Priority::Urgent
        )));
        assert!(!predicate.matches(&colis(
            "Lyon",
            ColisStatus::InTransit,
            Priority::Low
        )));
        assert!(!predicate.matches(&colis(
            "Nice",
            ColisStatus::InTransit,
            Priority::Urgent
        )));
    }

    #[test]
    fn test_criteria_deserialize_from_query_shape() {
        let criteria: ColisCriteria = serde_json::from_value(
            serde_json::json!({"status": "IN_STOCK", "priority": "HIGH"}),
        )
        .unwrap();

        assert_eq!(criteria.status, Some(ColisStatus::InStock));
        assert_eq!(criteria.priority, Some(Priority::High));
        assert!(criteria.zone_id.is_none());
    }
}
