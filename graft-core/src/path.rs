//! Index paths from the root of a value graph to one of its slots.

use core::fmt;

/// The sequence of array indices leading from the root of a graph to a slot.
///
/// Displayed as `<root>` when empty, otherwise as `[1][0][4]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Path {
    steps: Vec<usize>,
}

impl Path {
    /// The empty path, pointing at the root.
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Push an index onto the path.
    pub fn push(&mut self, index: usize) {
        self.steps.push(index);
    }

    /// Pop the last index from the path.
    pub fn pop(&mut self) -> Option<usize> {
        self.steps.pop()
    }

    /// A copy of this path extended by `index`.
    pub fn child(&self, index: usize) -> Self {
        let mut child = self.clone();
        child.push(index);
        child
    }

    /// The indices, outermost first.
    pub fn steps(&self) -> &[usize] {
        &self.steps
    }

    /// Number of indices in the path.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether this path points at the root.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl From<&[usize]> for Path {
    fn from(steps: &[usize]) -> Self {
        Self {
            steps: steps.to_vec(),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return f.write_str("<root>");
        }
        for index in &self.steps {
            write!(f, "[{index}]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_testhelpers::test;

    #[test]
    fn display() {
        let mut path = Path::new();
        assert_eq!(path.to_string(), "<root>");
        path.push(1);
        path.push(0);
        assert_eq!(path.to_string(), "[1][0]");
        assert_eq!(path.child(7).to_string(), "[1][0][7]");
        assert_eq!(path.pop(), Some(0));
        assert_eq!(path.steps(), &[1]);
    }

    #[test]
    fn from_steps() {
        let path = Path::from(&[2usize, 0, 5] as &[usize]);
        assert_eq!(path.len(), 3);
        assert!(!path.is_empty());
        assert_eq!(path.to_string(), "[2][0][5]");
        assert_eq!(Path::from(&[] as &[usize]), Path::new());
        assert_eq!(Path::new().len(), 0);
    }
}
