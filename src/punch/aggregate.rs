use crate::model::{AuthorIdentity, AuthorSection, CommitRecord, FrequencyTable, RenderModel};
use std::collections::HashMap;

struct AuthorAccum {
    identity: AuthorIdentity,
    table: FrequencyTable,
}

/// Result of a single aggregation pass over a commit stream.
///
/// Authors keep the order in which they first appeared in the stream. Each
/// author's display name is the one carried by the last commit seen for that
/// email.
#[derive(Default)]
pub struct Aggregation {
    authors: Vec<AuthorAccum>,
    index: HashMap<String, usize>,
    max_count: u32,
    total_commits: u64,
}

impl Aggregation {
    fn record(&mut self, commit: CommitRecord) {
        let slot = commit.slot();
        let CommitRecord {
            author_email,
            author_name,
            ..
        } = commit;

        let idx = match self.index.get(&author_email) {
            Some(&idx) => {
                self.authors[idx].identity.name = author_name;
                idx
            }
            None => {
                let idx = self.authors.len();
                self.index.insert(author_email.clone(), idx);
                self.authors.push(AuthorAccum {
                    identity: AuthorIdentity {
                        email: author_email,
                        name: author_name,
                    },
                    table: FrequencyTable::default(),
                });
                idx
            }
        };

        let count = self.authors[idx].table.increment(slot);
        self.max_count = self.max_count.max(count);
        self.total_commits += 1;
    }

    pub fn frequencies(&self, email: &str) -> Option<&FrequencyTable> {
        self.index.get(email).map(|&idx| &self.authors[idx].table)
    }

    pub fn display_name(&self, email: &str) -> Option<&str> {
        self.index
            .get(email)
            .map(|&idx| self.authors[idx].identity.name.as_str())
    }

    pub fn max_count(&self) -> u32 {
        self.max_count
    }

    pub fn total_commits(&self) -> u64 {
        self.total_commits
    }

    pub fn author_count(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }

    pub fn authors(&self) -> impl Iterator<Item = (&AuthorIdentity, &FrequencyTable)> + '_ {
        self.authors.iter().map(|a| (&a.identity, &a.table))
    }

    pub fn into_render_model(self) -> RenderModel {
        let sections = self
            .authors
            .into_iter()
            .map(|AuthorAccum { identity, table }| AuthorSection { identity, table })
            .collect();
        RenderModel::new(sections, self.max_count)
    }
}

/// Builds per-author day/hour counts in one forward pass over `commits`.
pub fn aggregate<I>(commits: I) -> Aggregation
where
    I: IntoIterator<Item = CommitRecord>,
{
    let mut aggregation = Aggregation::default();
    for commit in commits {
        aggregation.record(commit);
    }
    aggregation
}

/// Like [`aggregate`], but stops at and returns the first error of the stream.
pub fn try_aggregate<I, E>(commits: I) -> Result<Aggregation, E>
where
    I: IntoIterator<Item = Result<CommitRecord, E>>,
{
    let mut aggregation = Aggregation::default();
    for commit in commits {
        aggregation.record(commit?);
    }
    tracing::debug!(
        authors = aggregation.author_count(),
        commits = aggregation.total_commits,
        max_count = aggregation.max_count,
        "aggregation finished"
    );
    Ok(aggregation)
}
