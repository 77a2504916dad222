//! CLI command implementations.
//!
//! Every command opens the workspace, runs one network operation, and saves
//! afterwards if it mutated anything.

use crate::config::{Backend, Config, KINSHIP_DIR};
use colored::Colorize;
use kinship_core::Profile;
use kinship_graph::{
    NetworkBuilder, ProfileInfo, ProfileRepository, SocialNetwork, StoreError, SuggestionInfo,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Output format for `viz`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum VizFormat {
    Json,
    Dot,
}

/// Where the workspace's profiles came from.
enum Storage {
    Ready(Box<dyn ProfileRepository>),
    /// The stored snapshot could not be opened or read.
    Unavailable(String),
}

/// A loaded network plus the storage it came from.
struct Workspace {
    data_path: PathBuf,
    storage: Storage,
    network: SocialNetwork,
}

impl Workspace {
    /// Loads the workspace. Unreadable data degrades to an empty network,
    /// and such a workspace refuses to save over it.
    fn open(dir: &Path) -> Result<Self> {
        let config = Config::load(dir)?;
        let data_path = config.data_path(dir);

        let (storage, profiles) = match config.repository(dir) {
            Ok(repository) => match repository.load() {
                Ok(profiles) => (Storage::Ready(repository), profiles),
                Err(e) => {
                    warn!("Could not load profiles, starting empty: {}", e);
                    (Storage::Unavailable(e.to_string()), Vec::new())
                }
            },
            Err(e) => {
                warn!("Could not open profile storage, starting empty: {}", e);
                (Storage::Unavailable(e.to_string()), Vec::new())
            }
        };

        let mut builder = NetworkBuilder::new(config.index()?);
        builder.add_profiles(profiles)?;
        let (network, _) = builder.build()?;

        Ok(Self {
            data_path,
            storage,
            network,
        })
    }

    fn save(&self) -> Result<()> {
        match &self.storage {
            Storage::Ready(repository) => {
                repository.save(&self.network.list_profiles())?;
                Ok(())
            }
            Storage::Unavailable(reason) => Err(StoreError::Unavailable {
                path: self.data_path.clone(),
                reason: reason.clone(),
            }
            .into()),
        }
    }
}

/// Initialize Kinship in a directory.
pub fn init(dir: &Path, backend: Backend, capacity: usize, growable: bool) -> Result<()> {
    let config_path = Config::path(dir);
    if config_path.exists() {
        println!("{} Already initialized", "✓".green());
        return Ok(());
    }

    let config = Config::new(backend, (!growable).then_some(capacity));
    // Reject a zero capacity before anything is written.
    config.index()?;
    config.save(dir)?;

    println!(
        "{} Initialized Kinship in {}",
        "✓".green(),
        dir.join(KINSHIP_DIR).display()
    );
    println!("  Run {} to add a profile", "kinship create".cyan());
    Ok(())
}

/// Create a profile.
pub fn create(dir: &Path, id: &str, name: &str, age: u8, gender: &str) -> Result<()> {
    let mut workspace = Workspace::open(dir)?;
    workspace
        .network
        .create_profile(Profile::new(id, name, age, gender)?)?;
    workspace.save()?;

    println!("{} Created profile {}", "✓".green(), id.cyan());
    Ok(())
}

/// Create a friendship between two profiles.
pub fn befriend(dir: &Path, a: &str, b: &str, quality: u8) -> Result<()> {
    let mut workspace = Workspace::open(dir)?;
    workspace.network.befriend(a, b, quality)?;
    workspace.save()?;

    println!(
        "{} {} and {} are now friends (quality {})",
        "✓".green(),
        a.cyan(),
        b.cyan(),
        quality
    );
    Ok(())
}

/// Report whether two profiles share a component.
pub fn connected(dir: &Path, a: &str, b: &str) -> Result<()> {
    let mut workspace = Workspace::open(dir)?;
    if workspace.network.connected(a, b) {
        println!("{} {} and {} are connected", "✓".green(), a.cyan(), b.cyan());
    } else {
        println!("{} {} and {} are not connected", "✗".red(), a.cyan(), b.cyan());
    }
    Ok(())
}

/// Suggest friends for a profile.
pub fn suggest(dir: &Path, id: &str, json: bool) -> Result<()> {
    let workspace = Workspace::open(dir)?;
    let suggestions: Vec<SuggestionInfo> = workspace
        .network
        .suggest_friends(id)?
        .iter()
        .map(SuggestionInfo::from)
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
        return Ok(());
    }

    if suggestions.is_empty() {
        println!("No suggestions for {}", id.cyan());
        return Ok(());
    }

    println!("Suggestions for {} (best first):\n", id.cyan());
    for (i, suggestion) in suggestions.iter().enumerate() {
        println!(
            "  {}. {} {}",
            i + 1,
            suggestion.name,
            format!("[{}]", suggestion.id).dimmed()
        );
        println!("     priority {}", suggestion.priority.to_string().yellow());
    }
    Ok(())
}

/// List every profile.
pub fn list(dir: &Path, json: bool) -> Result<()> {
    let workspace = Workspace::open(dir)?;
    let profiles: Vec<ProfileInfo> = workspace
        .network
        .list_profiles()
        .into_iter()
        .map(ProfileInfo::from)
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&profiles)?);
        return Ok(());
    }

    if profiles.is_empty() {
        println!("No profiles yet");
        return Ok(());
    }

    for (i, profile) in profiles.iter().enumerate() {
        println!(
            "  {}. {} {}",
            i + 1,
            profile.name,
            format!("[{}]", profile.id).dimmed()
        );
        println!(
            "     age {} | gender {} | friends {}",
            profile.age, profile.gender, profile.friend_count
        );
    }
    Ok(())
}

/// Print the index state and export the graph projection.
pub fn viz(dir: &Path, format: VizFormat, output: Option<&Path>) -> Result<()> {
    let workspace = Workspace::open(dir)?;
    let projection = workspace.network.projection();

    eprintln!("{}", workspace.network.index().snapshot());

    let rendered = match format {
        VizFormat::Json => serde_json::to_string_pretty(&projection)?,
        VizFormat::Dot => projection.to_dot(),
    };

    match output {
        Some(path) => {
            fs::write(path, rendered)?;
            println!(
                "{} Exported {} nodes and {} edges to {}",
                "✓".green(),
                projection.node_count(),
                projection.edge_count(),
                path.display()
            );
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

/// Show workspace statistics.
pub fn status(dir: &Path) -> Result<()> {
    let config = Config::load(dir)?;
    let workspace = Workspace::open(dir)?;
    let index = workspace.network.index();

    println!("{}", "Kinship status".cyan().bold());
    println!(
        "  Backend:    {:?} ({})",
        config.backend,
        config.data_path(dir).display()
    );
    println!("  Profiles:   {}", workspace.network.profiles().count());
    println!(
        "  Friendships: {}",
        workspace.network.projection().edge_count()
    );
    match index.capacity() {
        Some(capacity) => println!("  Index:      {} / {} slots", index.len(), capacity),
        None => println!("  Index:      {} slots (growable)", index.len()),
    }
    println!("  Components: {}", index.component_count());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_workspace_round_trip() {
        let dir = tempdir().unwrap();
        init(dir.path(), Backend::Json, 10, false).unwrap();

        create(dir.path(), "A", "Alice", 30, "F").unwrap();
        create(dir.path(), "B", "Bruno", 31, "M").unwrap();
        create(dir.path(), "C", "Carla", 32, "F").unwrap();
        befriend(dir.path(), "A", "B", 5).unwrap();
        befriend(dir.path(), "B", "C", 3).unwrap();

        // A fresh open rebuilds connectivity from the saved adjacency.
        let mut workspace = Workspace::open(dir.path()).unwrap();
        assert_eq!(workspace.network.profiles().count(), 3);
        assert!(workspace.network.connected("A", "C"));
        assert_eq!(workspace.network.index().component_count(), 8);
    }

    #[test]
    fn test_errors_surface() {
        let dir = tempdir().unwrap();
        create(dir.path(), "A", "Alice", 30, "F").unwrap();

        assert!(create(dir.path(), "A", "Again", 30, "F").is_err());
        assert!(create(dir.path(), "X", "Old", 121, "F").is_err());
        assert!(befriend(dir.path(), "A", "A", 3).is_err());
        assert!(suggest(dir.path(), "ghost", false).is_err());
    }

    #[test]
    fn test_corrupt_data_starts_empty() {
        let dir = tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        fs::write(config.data_path(dir.path()), "not json").unwrap();

        let workspace = Workspace::open(dir.path()).unwrap();
        assert!(workspace.network.profiles().is_empty());
    }

    fn assert_refused(result: Result<()>) {
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::Unavailable { .. })
        ));
    }

    #[test]
    fn test_unreadable_data_is_not_overwritten() {
        let dir = tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        // One out-of-range quality fails the whole snapshot.
        let raw = r#"[{"id":"A","name":"Alice","age":30,"gender":"F","adjacency":{"B":9}}]"#;
        let data = config.data_path(dir.path());
        fs::write(&data, raw).unwrap();

        list(dir.path(), false).unwrap();
        assert_refused(create(dir.path(), "Z", "Zoe", 22, "F"));
        assert_eq!(fs::read_to_string(&data).unwrap(), raw);
    }

    #[test]
    fn test_unopenable_sled_starts_empty() {
        let dir = tempdir().unwrap();
        let config = Config::new(Backend::Sled, Some(10));
        config.save(dir.path()).unwrap();

        // A plain file where the database directory should be.
        let data = config.data_path(dir.path());
        fs::write(&data, "not a database").unwrap();

        let workspace = Workspace::open(dir.path()).unwrap();
        assert!(workspace.network.profiles().is_empty());
        assert!(matches!(workspace.storage, Storage::Unavailable(_)));

        status(dir.path()).unwrap();
        assert_refused(create(dir.path(), "A", "Alice", 30, "F"));
        assert_eq!(fs::read_to_string(&data).unwrap(), "not a database");
    }

    #[test]
    fn test_sled_backend() {
        let dir = tempdir().unwrap();
        init(dir.path(), Backend::Sled, 0, true).unwrap();
        create(dir.path(), "A", "Alice", 30, "F").unwrap();
        create(dir.path(), "B", "Bruno", 31, "M").unwrap();
        befriend(dir.path(), "A", "B", 2).unwrap();

        let workspace = Workspace::open(dir.path()).unwrap();
        assert_eq!(
            workspace.network.profiles().shared_quality("B", "A").map(|q| q.get()),
            Some(2)
        );
        assert_eq!(workspace.network.index().capacity(), None);
    }

    #[test]
    fn test_viz_writes_file() {
        let dir = tempdir().unwrap();
        create(dir.path(), "A", "Alice", 30, "F").unwrap();
        create(dir.path(), "B", "Bruno", 31, "M").unwrap();
        befriend(dir.path(), "A", "B", 4).unwrap();

        let out = dir.path().join("graph.dot");
        viz(dir.path(), VizFormat::Dot, Some(&out)).unwrap();
        let dot = fs::read_to_string(out).unwrap();
        assert!(dot.contains(" -- "));
    }
}
