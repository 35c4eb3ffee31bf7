use serde::{Deserialize, Serialize};

/// One day's complete raw counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub name: String,
    pub total_rooms: u32,
    pub trainees_available: u32,
    pub crnas_available: u32,
    pub faculty_available: u32,
}

/// Counts as read from a table, before deciding whether the day is usable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawScenario {
    pub name: String,
    pub total_rooms: Option<u32>,
    pub trainees: Option<u32>,
    pub crnas: Option<u32>,
    pub faculty: Option<u32>,
}

impl RawScenario {
    /// A day missing any required count is [Scenario::Empty]; nothing downstream
    /// re-checks individual fields.
    pub fn resolve(self) -> Scenario {
        match (self.total_rooms, self.trainees, self.crnas, self.faculty) {
            (Some(total_rooms), Some(trainees), Some(crnas), Some(faculty)) => {
                Scenario::Complete(ScenarioInput {
                    name: self.name,
                    total_rooms,
                    trainees_available: trainees,
                    crnas_available: crnas,
                    faculty_available: faculty,
                })
            }
            _ => Scenario::Empty { name: self.name },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scenario {
    Complete(ScenarioInput),
    Empty { name: String },
}

impl Scenario {
    pub fn name(&self) -> &str {
        match self {
            Self::Complete(input) => &input.name,
            Self::Empty { name } => name,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }
}

impl From<ScenarioInput> for Scenario {
    fn from(input: ScenarioInput) -> Self {
        Self::Complete(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(total_rooms: Option<u32>, faculty: Option<u32>) -> RawScenario {
        RawScenario {
            name: "Mon".to_string(),
            total_rooms,
            trainees: Some(4),
            crnas: Some(10),
            faculty,
        }
    }

    #[test]
    fn complete_counts_resolve_to_input() {
        let scenario = raw(Some(20), Some(12)).resolve();
        assert_eq!(
            scenario,
            Scenario::Complete(ScenarioInput {
                name: "Mon".to_string(),
                total_rooms: 20,
                trainees_available: 4,
                crnas_available: 10,
                faculty_available: 12,
            })
        );
        assert!(!scenario.is_empty());
    }

    #[test]
    fn any_missing_count_makes_the_day_empty() {
        assert!(raw(None, Some(12)).resolve().is_empty());
        assert!(raw(Some(20), None).resolve().is_empty());
        assert_eq!(raw(None, None).resolve().name(), "Mon");
    }

    #[test]
    fn zero_counts_are_not_missing() {
        assert!(!raw(Some(0), Some(0)).resolve().is_empty());
    }
}
