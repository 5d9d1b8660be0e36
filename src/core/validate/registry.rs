use indexmap::IndexMap;

use crate::core::codegen::DerivedName;

/// Derived names claimed during one run, keyed by generated unit. The first claimant
/// registers; every later claimant clashes with it.
#[derive(Debug, Default)]
pub struct ConflictRegistry {
    claims: IndexMap<DerivedName, Claimant>,
}

#[derive(Debug)]
struct Claimant {
    index: usize,
    subject: String,
    clashed: bool,
}

/// A rejected claim, naming the request that registered first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameClash {
    pub first: usize,
    pub first_subject: String,
    /// True on the first clash against this name; the first claimant is
    /// reported once.
    pub first_newly_clashed: bool,
}

impl ConflictRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, name: DerivedName, index: usize, subject: &str) -> Result<(), NameClash> {
        match self.claims.get_mut(&name) {
            Some(claimant) => {
                let first_newly_clashed = !claimant.clashed;
                claimant.clashed = true;
                Err(NameClash {
                    first: claimant.index,
                    first_subject: claimant.subject.clone(),
                    first_newly_clashed,
                })
            }
            None => {
                self.claims.insert(
                    name,
                    Claimant {
                        index,
                        subject: subject.to_string(),
                        clashed: false,
                    },
                );
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
