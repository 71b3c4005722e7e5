use crate::error::{PunchError, Result};
use crate::model::{CommitRecord, DateRange, IdentitySource};
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use gix::{discover, ObjectId, Repository};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use super::CommitSource;

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
    progress: bool,
}

impl GitRepo {
    /// Open a repository at `path`, or current dir if `None`
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let repo_path = match path {
            Some(p) => p.as_ref().to_path_buf(),
            None => std::env::current_dir()?,
        };

        let repo = discover(&repo_path)?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        tracing::debug!(path = %path.display(), "opened repository");

        Ok(Self {
            repo,
            path,
            progress: true,
        })
    }

    /// Show a spinner on stderr while walking history.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn resolve_range(&self, since: Option<&str>, until: Option<&str>) -> Result<DateRange> {
        let mut range = DateRange::new();

        let since_dt = since.map(|s| self.parse_commit_or_date(s)).transpose()?;
        let until_dt = until.map(|u| self.parse_commit_or_date(u)).transpose()?;

        if let (Some(s), Some(u)) = (since_dt, until_dt) {
            if s > u {
                return Err(PunchError::InvalidDate(format!(
                    "Invalid range: since ({s}) is after until ({u})"
                )));
            }
        }

        if let Some(s) = since_dt {
            range = range.with_since(s);
        }
        if let Some(u) = until_dt {
            range = range.with_until(u);
        }

        Ok(range)
    }

    fn parse_commit_or_date(&self, input: &str) -> Result<DateTime<Utc>> {
        if let Some(dt) = parse_date(input) {
            return Ok(dt);
        }

        // Fallback to Git ref
        let id = self
            .repo
            .rev_parse_single(input)
            .map_err(|e| PunchError::Parse(format!("Invalid commit or date '{input}': {e}")))?;

        let commit = id
            .object()?
            .try_into_commit()
            .map_err(|_| PunchError::Parse(format!("Not a commit: {input}")))?;

        let secs = commit.time()?.seconds;
        DateTime::<Utc>::from_timestamp(secs, 0)
            .ok_or_else(|| PunchError::InvalidDate(format!("Invalid timestamp: {secs}")))
    }
}

impl CommitSource for GitRepo {
    fn is_valid_repository(path: &Path) -> bool {
        gix::open(path).is_ok()
    }

    fn commits(
        &self,
        range: &DateRange,
        identity: IdentitySource,
    ) -> Result<Box<dyn Iterator<Item = Result<CommitRecord>> + '_>> {
        let mut head = self.repo.head()?;
        let stack = if head.is_unborn() {
            tracing::info!("HEAD is unborn, history is empty");
            VecDeque::new()
        } else {
            VecDeque::from([head.peel_to_commit_in_place()?.id])
        };

        let progress = if self.progress {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg} {pos}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message("Collecting commits...");
            pb
        } else {
            ProgressBar::hidden()
        };

        Ok(Box::new(CommitWalk {
            repo: &self.repo,
            stack,
            seen: HashSet::new(),
            range: range.clone(),
            identity,
            progress,
            done: false,
        }))
    }
}

/// Lazy walk over the ancestry of `HEAD`, first parents first, each commit once.
pub struct CommitWalk<'repo> {
    repo: &'repo Repository,
    stack: VecDeque<ObjectId>,
    seen: HashSet<ObjectId>,
    range: DateRange,
    identity: IdentitySource,
    progress: ProgressBar,
    done: bool,
}

impl CommitWalk<'_> {
    fn visit(&mut self, commit_id: ObjectId) -> Result<Option<CommitRecord>> {
        let commit = self.repo.find_commit(commit_id)?;
        let parents: Vec<ObjectId> = commit.parent_ids().map(|id| id.into()).collect();
        for pid in parents.into_iter().rev() {
            self.stack.push_back(pid);
        }

        // Identity and time come from the same signature.
        let signature = match self.identity {
            IdentitySource::Author => commit.author()?,
            IdentitySource::Committer => commit.committer()?,
        };
        let time = signature
            .time()
            .map_err(|e| PunchError::Parse(format!("Invalid signature time in {commit_id}: {e}")))?;
        let timestamp = to_datetime(time.seconds, time.offset)?;
        if !self.range.contains(&timestamp.with_timezone(&Utc)) {
            tracing::trace!(%commit_id, "outside date range");
            return Ok(None);
        }

        Ok(Some(CommitRecord::new(
            signature.email.to_string(),
            signature.name.to_string(),
            timestamp,
        )))
    }

    fn finish(&mut self) {
        if !self.done {
            self.done = true;
            self.progress.finish_with_message("Commits collected");
            tracing::info!(commits = self.progress.position(), "history walk finished");
        }
    }
}

impl Iterator for CommitWalk<'_> {
    type Item = Result<CommitRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(commit_id) = self.stack.pop_back() {
            if !self.seen.insert(commit_id) {
                continue;
            }

            match self.visit(commit_id) {
                Ok(Some(record)) => {
                    self.progress.inc(1);
                    return Some(Ok(record));
                }
                Ok(None) => continue,
                Err(err) => {
                    tracing::warn!(%commit_id, error = %err, "history walk aborted");
                    self.stack.clear();
                    self.done = true;
                    self.progress.abandon();
                    return Some(Err(err));
                }
            }
        }
        self.finish();
        None
    }
}

fn to_datetime(seconds: i64, offset: i32) -> Result<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(offset)
        .ok_or_else(|| PunchError::InvalidDate(format!("Invalid UTC offset: {offset}")))?;
    let utc = DateTime::<Utc>::from_timestamp(seconds, 0)
        .ok_or_else(|| PunchError::InvalidDate(format!("Invalid timestamp: {seconds}")))?;
    Ok(utc.with_timezone(&offset))
}

fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    // RFC3339
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    // YYYY-MM-DD
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(datetime) = date.and_hms_opt(0, 0, 0) {
            return Some(Utc.from_utc_datetime(&datetime));
        }
    }

    // Relative duration (e.g. "2 weeks ago")
    let duration = parse_natural_duration(input)?;
    let target = SystemTime::now().checked_sub(duration)?;
    Some(DateTime::<Utc>::from(target))
}

fn parse_natural_duration(input: &str) -> Option<Duration> {
    let input = input.trim().to_lowercase();

    let units = [
        (" days ago", 86400),
        (" weeks ago", 7 * 86400),
        (" months ago", 30 * 86400),
    ];
    for (suffix, secs) in units {
        if let Some(n) = input.strip_suffix(suffix) {
            if let Ok(n) = n.trim().parse::<u64>() {
                return Some(Duration::from_secs(n * secs));
            }
        }
    }

    None
}
