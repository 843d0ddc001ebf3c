//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use gangway_core::{
    DealFilter, DealId, DealMovedEvent, GangwayError, MoveOutcome, Money, NotificationSink,
    PipelineBoard, PortalCatalog, Priority, Role, Seed, Stage, UserContext, default_feature,
    filter_deals, primitives::MAX_SEARCH_LENGTH,
};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum seed file size (8 MB).
///
/// This prevents memory exhaustion from malicious or accidental large files.
const MAX_SEED_FILE_SIZE: u64 = 8 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), GangwayError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| GangwayError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(GangwayError::SerializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Validate an input file path.
///
/// Canonicalizes the path (resolving symlinks and "..") and ensures it is
/// a regular file, so a crafted seed path cannot reach outside the
/// operator's intent.
fn validate_file_path(path: &Path) -> Result<PathBuf, GangwayError> {
    let canonical = path.canonicalize().map_err(|e| {
        GangwayError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(GangwayError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Validate an output path: the parent directory must exist.
fn validate_output_path(path: &Path) -> Result<PathBuf, GangwayError> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        GangwayError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(GangwayError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| GangwayError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

// =============================================================================
// SEED FILE I/O
// =============================================================================

/// Load and validate a seed file.
fn load_seed(path: &Path) -> Result<Seed, GangwayError> {
    let validated = validate_file_path(path)?;
    validate_file_size(&validated, MAX_SEED_FILE_SIZE)?;

    let contents = std::fs::read(&validated)
        .map_err(|e| GangwayError::IoError(format!("Read file: {}", e)))?;

    let seed: Seed = serde_json::from_slice(&contents)
        .map_err(|e| GangwayError::SerializationError(format!("Invalid seed file: {}", e)))?;

    seed.validate()?;
    Ok(seed)
}

/// Write a seed snapshot.
fn write_seed(path: &Path, seed: &Seed) -> Result<(), GangwayError> {
    let validated = validate_output_path(path)?;

    let contents = serde_json::to_vec_pretty(seed)
        .map_err(|e| GangwayError::SerializationError(format!("Encode seed: {}", e)))?;

    std::fs::write(&validated, contents)
        .map_err(|e| GangwayError::IoError(format!("Write file: {}", e)))
}

// =============================================================================
// NOTIFICATION SINK
// =============================================================================

/// The binary's notification sink: committed moves become log lines.
///
/// A toast UI or audit trail would implement the same trait; the CORE does
/// not care which one is listening.
struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&mut self, event: &DealMovedEvent) {
        tracing::info!(
            target: "gangway::pipeline",
            deal = %event.deal_id,
            title = %event.deal_title,
            from = event.from.as_str(),
            to = event.to.as_str(),
            "deal moved"
        );
    }
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// Render minor units as a decimal amount.
fn format_money(value: Money) -> String {
    format!("{}.{:02}", value.value() / 100, value.value() % 100)
}

/// Parse a CLI priority argument. "all" disables priority filtering.
fn parse_priority(s: &str) -> Result<Option<Priority>, GangwayError> {
    if s == "all" {
        return Ok(None);
    }
    s.parse::<Priority>()
        .map(Some)
        .map_err(|_| GangwayError::SerializationError(format!("Unknown priority: {}", s)))
}

// =============================================================================
// BOARD COMMAND
// =============================================================================

/// Show the pipeline board.
pub fn cmd_board(seed_path: &Path, json_mode: bool) -> Result<(), GangwayError> {
    let seed = load_seed(seed_path)?;
    let board = PipelineBoard::from_seed(&seed)?;
    let aggregates = board.aggregates();

    if json_mode {
        let output = serde_json::json!({
            "seed": seed_path.to_string_lossy(),
            "deal_count": board.len(),
            "stages": aggregates,
            "deals": board.snapshot(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Gangway Pipeline Board");
    println!("======================");
    println!("Seed:  {:?}", seed_path);
    println!("Deals: {}", board.len());
    println!();

    for aggregate in &aggregates {
        println!(
            "{} — {} deal(s), total {}",
            aggregate.stage.name(),
            aggregate.deal_count,
            format_money(aggregate.total_value)
        );
        for deal in board.deals_in_stage(aggregate.stage) {
            println!(
                "  [{}] {} — {} ({}, {})",
                deal.id,
                deal.title,
                deal.client_name,
                format_money(deal.value),
                deal.priority
            );
        }
    }

    Ok(())
}

// =============================================================================
// MOVE COMMAND
// =============================================================================

/// Move a deal to a target stage.
pub fn cmd_move(
    seed_path: &Path,
    json_mode: bool,
    deal: &str,
    to: &str,
    write: bool,
) -> Result<(), GangwayError> {
    // Stage parsing is the unknown-stage boundary: fail here, mutate nothing.
    let target: Stage = to.parse()?;
    let id = DealId::new(deal);

    let seed = load_seed(seed_path)?;
    let mut board = PipelineBoard::from_seed(&seed)?;

    let outcome = board.move_deal(&id, target, &mut TracingSink)?;

    if write {
        let snapshot = Seed {
            deals: board.snapshot(),
            users: seed.users.clone(),
        };
        write_seed(seed_path, &snapshot)?;
    }

    if json_mode {
        let output = serde_json::json!({
            "deal": id,
            "outcome": outcome,
            "written": write,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    match outcome {
        MoveOutcome::Moved { from, to, .. } => {
            println!("Moved {} : {} -> {}", id, from.as_str(), to.as_str());
        }
        MoveOutcome::Unchanged { stage } => {
            println!("{} already in {} — nothing to do", id, stage.as_str());
        }
    }
    if write {
        println!("Snapshot written to {:?}", seed_path);
    }

    Ok(())
}

// =============================================================================
// PORTAL COMMAND
// =============================================================================

/// Resolve the portal for a role.
pub fn cmd_portal(
    seed_path: &Path,
    json_mode: bool,
    role: &str,
    user_id: Option<&str>,
    grants: Option<&str>,
) -> Result<(), GangwayError> {
    let role: Role = role.parse()?;

    let user = match user_id {
        Some(id) => {
            let seed = load_seed(seed_path)?;
            seed.user(id)
                .cloned()
                .ok_or_else(|| GangwayError::InvalidSeed(format!("no seeded user: {}", id)))?
        }
        None => {
            let mut user = UserContext::new("anonymous", "Anonymous", "anonymous@localhost");
            if let Some(list) = grants {
                for grant in list.split(',').map(str::trim).filter(|g| !g.is_empty()) {
                    user = user.with_permission(grant);
                }
            }
            user
        }
    };

    let catalog = PortalCatalog::builtin();
    let resolved = catalog.resolve(role, &user)?;

    if json_mode {
        let initial = default_feature(&resolved.visible_features).map(|f| f.id.clone());
        let output = serde_json::json!({
            "role": role,
            "user": user.id,
            "portal": resolved,
            "default_feature": initial,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Portal: {} ({})", resolved.config.display_name, role);
    println!("User:   {} ({})", user.name, user.id);
    println!();
    println!(
        "Layout: sidebar={} topbar={} notifications={} search={} profile_menu={}",
        resolved.config.layout.sidebar,
        resolved.config.layout.topbar,
        resolved.config.layout.notifications,
        resolved.config.layout.search,
        resolved.config.layout.profile_menu
    );
    println!();

    if resolved.visible_features.is_empty() {
        println!("No visible features — the portal shows its empty state.");
        return Ok(());
    }

    let initial = default_feature(&resolved.visible_features).map(|f| f.id.clone());
    println!("Features (navigation order):");
    for feature in &resolved.visible_features {
        let marker = if Some(&feature.id) == initial.as_ref() {
            "*"
        } else {
            " "
        };
        println!("  {} {} — {}", marker, feature.id, feature.name);
    }

    Ok(())
}

// =============================================================================
// FILTER COMMAND
// =============================================================================

/// List deals matching a filter.
pub fn cmd_filter(
    seed_path: &Path,
    json_mode: bool,
    search: Option<&str>,
    priority: &str,
) -> Result<(), GangwayError> {
    if let Some(text) = search {
        if text.len() > MAX_SEARCH_LENGTH {
            return Err(GangwayError::SerializationError(format!(
                "Search text length {} exceeds maximum {}",
                text.len(),
                MAX_SEARCH_LENGTH
            )));
        }
    }

    let filter = DealFilter {
        search: search.map(str::to_string),
        priority: parse_priority(priority)?,
    };

    let seed = load_seed(seed_path)?;
    let board = PipelineBoard::from_seed(&seed)?;
    let snapshot = board.snapshot();
    let matched = filter_deals(&snapshot, &filter);

    if json_mode {
        let output = serde_json::json!({
            "filter": filter,
            "match_count": matched.len(),
            "deals": matched,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("{} match(es)", matched.len());
    for deal in matched {
        println!(
            "  [{}] {} — {} ({}, {}, {})",
            deal.id,
            deal.title,
            deal.client_name,
            deal.stage.as_str(),
            format_money(deal.value),
            deal.priority
        );
    }

    Ok(())
}

// =============================================================================
// STAGES COMMAND
// =============================================================================

/// Show static stage metadata.
pub fn cmd_stages(json_mode: bool) -> Result<(), GangwayError> {
    let metadata: Vec<_> = Stage::ALL.iter().map(|s| s.metadata()).collect();

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&metadata).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Pipeline Stages");
    println!("===============");
    for meta in metadata {
        println!(
            "{:10} {:14} conversion {:3}%  dwell {} day(s)",
            meta.stage.as_str(),
            meta.display_name,
            meta.expected_conversion_percent,
            meta.average_dwell_days
        );
    }

    Ok(())
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Write the example seed file.
pub fn cmd_init(seed_path: &Path, force: bool) -> Result<(), GangwayError> {
    if seed_path.exists() && !force {
        return Err(GangwayError::IoError(format!(
            "Seed file {:?} already exists (use --force to overwrite)",
            seed_path
        )));
    }

    let seed = Seed::example();
    write_seed(seed_path, &seed)?;

    println!(
        "Wrote example seed with {} deal(s) and {} user(s) to {:?}",
        seed.deals.len(),
        seed.users.len(),
        seed_path
    );

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
