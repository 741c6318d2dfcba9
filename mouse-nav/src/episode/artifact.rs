//! Terminal-state artifacts and their versioned filenames.
//!
//! Two records are written next to the maze file at the end of an attempt:
//!
//! - `.soluct`: the final solution with route, metrics and author block.
//!   The suffix number only advances when the content actually changed;
//!   re-solving a maze with an identical route coalesces onto the existing
//!   file (the `meta.date` field is ignored by the comparison).
//! - `.plan`: the full step log of one attempt, success or fail. Every
//!   attempt gets a fresh suffix.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::io::{Meta, PointRecord, PoseRecord};

use super::recorder::StepEntry;

/// Cost weight of one collision, in steps
const COLLISION_COST: u32 = 5;

/// Headline numbers of a finished attempt.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Counted steps (turns included)
    pub steps: u32,
    /// Collisions against ground truth
    pub collisions: u32,
    /// Wall-clock duration in seconds
    pub time_s: f32,
    /// steps + 5 * collisions
    pub cost: u32,
}

impl Metrics {
    /// Build metrics, deriving the cost
    pub fn new(steps: u32, collisions: u32, time_s: f32) -> Self {
        Self {
            steps,
            collisions,
            time_s,
            cost: steps + COLLISION_COST * collisions,
        }
    }
}

/// The solution artifact written on success.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolutionArtifact {
    /// Name of the maze file this solves
    pub map_file: String,
    pub width: u32,
    pub height: u32,
    pub entrance: PoseRecord,
    pub goal: PointRecord,
    pub metrics: Metrics,
    /// Agent cell after every counted step, entrance included, so the
    /// route has `metrics.steps + 1` entries
    pub path: Vec<PointRecord>,
    pub meta: Meta,
}

/// Terminal outcome of an attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EpisodeResult {
    Success,
    Fail,
}

/// Per-attempt summary block of the plan artifact.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub steps: u32,
    pub collisions: u32,
    pub score: f32,
}

/// The plan artifact: one attempt's full step log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanArtifact {
    /// Name of the maze file this attempt ran on
    pub map_file: String,
    pub width: u32,
    pub height: u32,
    pub start: PoseRecord,
    pub goal: PointRecord,
    pub result: EpisodeResult,
    pub summary: Summary,
    pub steps: Vec<StepEntry>,
    pub meta: Meta,
}

/// Highest `n` for which `<prefix><n>.<ext>` exists in `dir`
fn highest_version(dir: &Path, prefix: &str, ext: &str) -> u32 {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };
    entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name();
            let name = name.to_str()?;
            let rest = name.strip_prefix(prefix)?;
            let number = rest.strip_suffix(ext)?.strip_suffix('.')?;
            number.parse::<u32>().ok()
        })
        .max()
        .unwrap_or(0)
}

fn stem_and_dir(maze_path: &Path) -> Result<(String, PathBuf)> {
    let stem = maze_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::Format(format!("no file stem in {}", maze_path.display())))?
        .to_string();
    let dir = maze_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    Ok((stem, dir))
}

/// JSON value with `meta.date` blanked, for change detection
fn masked_value(json: &str) -> Option<serde_json::Value> {
    let mut value: serde_json::Value = serde_json::from_str(json).ok()?;
    if let Some(meta) = value.get_mut("meta") {
        if let Some(date) = meta.get_mut("date") {
            *date = serde_json::Value::Null;
        }
    }
    Some(value)
}

/// Write a solution next to its maze file, versioning the name.
///
/// Finds the highest existing `<stem>_solution_<n>.soluct`. When that
/// file's content equals the new one (`meta.date` aside), nothing is
/// written and the existing path is returned; otherwise the artifact goes
/// to suffix `n + 1`.
pub fn write_solution(maze_path: &Path, artifact: &SolutionArtifact) -> Result<PathBuf> {
    let (stem, dir) = stem_and_dir(maze_path)?;
    let prefix = format!("{stem}_solution_");
    let current = highest_version(&dir, &prefix, "soluct");
    let serialized = serde_json::to_string_pretty(artifact)?;

    if current >= 1 {
        let existing = dir.join(format!("{prefix}{current}.soluct"));
        if let Ok(previous) = fs::read_to_string(&existing) {
            if masked_value(&previous) == masked_value(&serialized) {
                log::info!("solution unchanged, keeping {}", existing.display());
                return Ok(existing);
            }
        }
    }

    let path = dir.join(format!("{prefix}{}.soluct", current + 1));
    fs::write(&path, serialized)?;
    log::info!("wrote solution -> {}", path.display());
    Ok(path)
}

/// Write an attempt log next to its maze file.
///
/// Plans never coalesce: every call takes the next free suffix
/// `<stem>_plan_<n+1>.plan`.
pub fn write_plan(maze_path: &Path, artifact: &PlanArtifact) -> Result<PathBuf> {
    let (stem, dir) = stem_and_dir(maze_path)?;
    let prefix = format!("{stem}_plan_");
    let next = highest_version(&dir, &prefix, "plan") + 1;
    let path = dir.join(format!("{prefix}{next}.plan"));
    fs::write(&path, serde_json::to_string_pretty(artifact)?)?;
    log::info!("wrote attempt log -> {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_solution() -> SolutionArtifact {
        SolutionArtifact {
            map_file: "trial.maze".into(),
            width: 3,
            height: 3,
            entrance: PoseRecord {
                x: 0,
                y: 0,
                heading: 1,
            },
            goal: PointRecord { x: 2, y: 2 },
            metrics: Metrics::new(6, 0, 1.5),
            path: vec![
                PointRecord { x: 0, y: 0 },
                PointRecord { x: 1, y: 0 },
                PointRecord { x: 2, y: 0 },
                PointRecord { x: 2, y: 1 },
                PointRecord { x: 2, y: 2 },
                PointRecord { x: 2, y: 2 },
                PointRecord { x: 2, y: 2 },
            ],
            meta: Meta {
                name: "Tester".into(),
                email: "tester@example.com".into(),
                github: "tester".into(),
                date: "2025-03-01T10:00:00+0000".into(),
            },
        }
    }

    #[test]
    fn test_metrics_cost() {
        let m = Metrics::new(120, 3, 12.0);
        assert_eq!(m.cost, 135);
    }

    #[test]
    fn test_identical_solution_coalesces() {
        let dir = TempDir::new().unwrap();
        let maze_path = dir.path().join("trial.maze");
        let artifact = sample_solution();

        let first = write_solution(&maze_path, &artifact).unwrap();
        assert!(first.ends_with("trial_solution_1.soluct"));

        let second = write_solution(&maze_path, &artifact).unwrap();
        assert_eq!(first, second);
        assert!(!dir.path().join("trial_solution_2.soluct").exists());
    }

    #[test]
    fn test_changed_solution_gets_next_suffix() {
        let dir = TempDir::new().unwrap();
        let maze_path = dir.path().join("trial.maze");
        let artifact = sample_solution();
        write_solution(&maze_path, &artifact).unwrap();

        let mut changed = artifact;
        changed.metrics = Metrics::new(5, 0, 1.1);
        let path = write_solution(&maze_path, &changed).unwrap();
        assert!(path.ends_with("trial_solution_2.soluct"));
    }

    #[test]
    fn test_date_alone_does_not_advance_version() {
        let dir = TempDir::new().unwrap();
        let maze_path = dir.path().join("trial.maze");
        let artifact = sample_solution();
        let first = write_solution(&maze_path, &artifact).unwrap();

        let mut later = artifact;
        later.meta.date = "2025-03-02T08:30:00+0000".into();
        let second = write_solution(&maze_path, &later).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_solution_roundtrip() {
        let dir = TempDir::new().unwrap();
        let maze_path = dir.path().join("trial.maze");
        let artifact = sample_solution();
        let path = write_solution(&maze_path, &artifact).unwrap();

        let restored: SolutionArtifact =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(restored, artifact);
        assert_eq!(restored.path.len() as u32, restored.metrics.steps + 1);
    }

    #[test]
    fn test_plans_never_coalesce() {
        let dir = TempDir::new().unwrap();
        let maze_path = dir.path().join("trial.maze");
        let artifact = PlanArtifact {
            map_file: "trial.maze".into(),
            width: 3,
            height: 3,
            start: PoseRecord {
                x: 0,
                y: 0,
                heading: 1,
            },
            goal: PointRecord { x: 2, y: 2 },
            result: EpisodeResult::Fail,
            summary: Summary {
                steps: 10,
                collisions: 2,
                score: -3.5,
            },
            steps: Vec::new(),
            meta: Meta::default(),
        };

        let first = write_plan(&maze_path, &artifact).unwrap();
        let second = write_plan(&maze_path, &artifact).unwrap();
        assert!(first.ends_with("trial_plan_1.plan"));
        assert!(second.ends_with("trial_plan_2.plan"));
    }
}
