/// Objective title → epic title → issue titles, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    objectives: Vec<ObjectiveGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectiveGroup {
    pub title: String,
    pub epics: Vec<EpicGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpicGroup {
    pub title: String,
    pub issues: Vec<String>,
}

impl Aggregate {
    /// Append an issue, creating the objective and epic entries on first use.
    /// Groups are matched by title.
    pub fn insert(&mut self, objective: &str, epic: &str, issue: String) {
        let objective_idx = match self.objectives.iter().position(|o| o.title == objective) {
            Some(idx) => idx,
            None => {
                self.objectives.push(ObjectiveGroup {
                    title: objective.to_string(),
                    epics: Vec::new(),
                });
                self.objectives.len() - 1
            }
        };
        let epics = &mut self.objectives[objective_idx].epics;

        let epic_idx = match epics.iter().position(|e| e.title == epic) {
            Some(idx) => idx,
            None => {
                epics.push(EpicGroup {
                    title: epic.to_string(),
                    issues: Vec::new(),
                });
                epics.len() - 1
            }
        };
        epics[epic_idx].issues.push(issue);
    }

    pub fn objectives(&self) -> &[ObjectiveGroup] {
        &self.objectives
    }

    pub fn is_empty(&self) -> bool {
        self.objectives.is_empty()
    }

    pub fn issue_count(&self) -> usize {
        self.objectives
            .iter()
            .flat_map(|o| &o.epics)
            .map(|e| e.issues.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_discovery_order() {
        let mut agg = Aggregate::default();
        agg.insert("O2", "E1", "a".to_string());
        agg.insert("O1", "E2", "b".to_string());
        agg.insert("O2", "E3", "c".to_string());
        agg.insert("O2", "E1", "d".to_string());

        let titles: Vec<_> = agg.objectives().iter().map(|o| o.title.as_str()).collect();
        assert_eq!(titles, vec!["O2", "O1"]);

        let o2 = &agg.objectives()[0];
        assert_eq!(o2.epics.len(), 2);
        assert_eq!(o2.epics[0].issues, vec!["a", "d"]);
        assert_eq!(agg.issue_count(), 4);
    }

    #[test]
    fn test_same_epic_title_under_different_objectives_stays_separate() {
        let mut agg = Aggregate::default();
        agg.insert("O1", "E", "a".to_string());
        agg.insert("O2", "E", "b".to_string());
        assert_eq!(agg.objectives().len(), 2);
        assert_eq!(agg.objectives()[1].epics[0].issues, vec!["b"]);
    }
}
