use super::*;

/// The target process and the direct children it had at attach time.
/// Children are never re-enumerated during a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessSet {
    pub target: Pid,
    pub name: String,
    pub children: Vec<Pid>,
}

impl ProcessSet {
    pub fn new(target: Pid, name: String, mut children: Vec<Pid>) -> Self {
        children.sort_unstable();
        Self {
            target,
            name,
            children,
        }
    }

    /// Pids whose counters contribute to a sample.
    pub fn monitored(&self, include_children: bool) -> Vec<Pid> {
        let mut pids = vec![self.target];
        if include_children {
            pids.extend_from_slice(&self.children);
        }
        pids
    }

    pub fn label(&self, include_children: bool) -> String {
        let mut label = format!("Process: '{}'", self.name);
        if include_children && !self.children.is_empty() {
            label.push_str(&format!(" | Num Children: '{}'", self.children.len()));
        }
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_sorted() {
        let set = ProcessSet::new(10, "make".into(), vec![42, 11, 30]);

        assert_eq!(set.children, vec![11, 30, 42]);
    }

    #[test]
    fn test_monitored_pids() {
        let set = ProcessSet::new(10, "make".into(), vec![11, 12]);

        assert_eq!(set.monitored(false), vec![10]);
        assert_eq!(set.monitored(true), vec![10, 11, 12]);
    }

    #[test]
    fn test_label() {
        let set = ProcessSet::new(10, "make".into(), vec![11, 12]);
        let lonely = ProcessSet::new(10, "make".into(), Vec::new());

        assert_eq!(set.label(false), "Process: 'make'");
        assert_eq!(set.label(true), "Process: 'make' | Num Children: '2'");
        assert_eq!(lonely.label(true), "Process: 'make'");
    }
}
