//! Folder inspection CLI commands.

use std::collections::{HashMap, HashSet};

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use lexia_core::config::AppConfig;
use lexia_core::error::AppError;
use lexia_core::types::FolderId;
use lexia_entity::folder::{Folder, FolderNode};
use lexia_service::context::RequestContext;

use crate::output::{self, OutputFormat};

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// Print a user's whole folder forest
    Tree {
        /// Owner's email address
        #[arg(short, long)]
        email: String,
    },
}

/// One line of the printed forest
#[derive(Debug, Serialize, Tabled)]
struct FolderRow {
    /// Indented name
    folder: String,
    /// Folder kind
    kind: String,
    /// Words stored directly in the folder
    words: i32,
    /// Language pair (word collections)
    languages: String,
    /// Folder ID
    id: String,
}

/// Assembles the full forest from a flat list of one user's folders.
///
/// Children keep the order they appear in `folders`. Folders whose parent is
/// missing from the list are left out.
fn build_forest(folders: Vec<Folder>) -> Vec<FolderNode> {
    let mut by_parent: HashMap<Option<FolderId>, Vec<Folder>> = HashMap::new();
    for folder in folders {
        by_parent.entry(folder.parent_id).or_default().push(folder);
    }

    let mut seen = HashSet::new();
    by_parent
        .remove(&None)
        .unwrap_or_default()
        .into_iter()
        .map(|root| attach(root, &mut by_parent, &mut seen))
        .collect()
}

fn attach(
    folder: Folder,
    by_parent: &mut HashMap<Option<FolderId>, Vec<Folder>>,
    seen: &mut HashSet<FolderId>,
) -> FolderNode {
    let mut node = FolderNode::leaf(folder);
    if !seen.insert(node.id()) {
        return node;
    }
    let children = by_parent.remove(&Some(node.id())).unwrap_or_default();
    node.subfolders = children
        .into_iter()
        .map(|child| attach(child, by_parent, seen))
        .collect();
    node
}

fn flatten(nodes: &[FolderNode], depth: usize, rows: &mut Vec<FolderRow>) {
    for node in nodes {
        let f = &node.folder;
        let languages = match (f.language_from, f.language_to) {
            (Some(from), Some(to)) => format!("{from} -> {to}"),
            (Some(from), None) => from.to_string(),
            _ => String::new(),
        };
        rows.push(FolderRow {
            folder: format!("{}{}", "  ".repeat(depth), f.name),
            kind: f.kind.to_string(),
            words: f.word_count,
            languages,
            id: f.id.to_string(),
        });
        flatten(&node.subfolders, depth + 1, rows);
    }
}

/// Execute folder commands
pub async fn execute(
    args: &FolderArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let services = super::connect(config).await?;

    match &args.command {
        FolderCommand::Tree { email } => {
            let user = services
                .users
                .find_by_email(email)
                .await?
                .ok_or_else(|| AppError::not_found(format!("User '{email}' not found")))?;
            let ctx = RequestContext::new(user.id, user.email.clone());

            let folders = services
                .folders
                .get_user_folders(&ctx)
                .await?
                .into_iter()
                .map(|node| node.folder)
                .collect();
            let forest = build_forest(folders);

            match format {
                OutputFormat::Json => output::print_item(&forest, format),
                OutputFormat::Table => {
                    let mut rows = Vec::new();
                    flatten(&forest, 0, &mut rows);
                    output::print_list(&rows, format);
                }
            }
        }
    }

    Ok(())
}
