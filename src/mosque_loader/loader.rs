use crate::domain::Mosque;
use crate::mosque_loader::factory::{MosqueFactoryError, from_json};
use futures::stream::FuturesOrdered;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::task::JoinError;
use tokio::{fs, task};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReadDirStream;
use tracing::{info, instrument, warn};

/// Loads every mosque file with the given extension from `directory`, ordered by file name. Only an
/// unreadable directory is fatal, files that cannot be read or parsed are logged and skipped.
#[instrument]
pub async fn load_mosques_from(directory: &str, extension: &str) -> Result<Vec<Mosque>, LoaderError> {
    info!("📁 Loading mosques...");
    let files = list_files(Path::new(directory), extension)
        .await
        .map_err(|source| LoaderError::ListDirectory {
            directory: directory.to_owned(),
            source,
        })?;

    let mut mosques = Vec::with_capacity(files.len());
    let mut skipped = 0;
    for result in load_files(files).await {
        match result {
            Ok(mosque) => mosques.push(mosque),
            Err(e) => {
                skipped += 1;
                warn!("⚠️ Skipping mosque file, {}", e);
            }
        }
    }

    info!("📁 Loading mosques... OK, {} loaded, {} skipped", mosques.len(), skipped);
    Ok(mosques)
}

/// Files in `directory` with the given extension, sorted by name.
async fn list_files(directory: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let mut entries = ReadDirStream::new(fs::read_dir(directory).await?);

    let mut files = Vec::new();
    while let Some(entry) = entries.next().await {
        let path = entry?.path();
        if path.extension().is_some_and(|e| e == extension) && fs::metadata(&path).await?.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Loads the files concurrently, the results keep the order of `paths`.
#[instrument(skip_all, fields(files = paths.len()))]
async fn load_files(paths: Vec<PathBuf>) -> Vec<Result<Mosque, LoaderError>> {
    FuturesOrdered::from_iter(paths.into_iter().map(load_file)).collect().await
}

async fn load_file(path: PathBuf) -> Result<Mosque, LoaderError> {
    let content = match fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(source) => return Err(LoaderError::Read { path, source }),
    };

    // Parsing and validation are CPU bound, keep them off the async workers.
    task::spawn_blocking(move || from_json(&content).map_err(|source| LoaderError::Parse { path, source })).await?
}

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("unable to list '{directory}': {source}")]
    ListDirectory { directory: String, source: io::Error },
    #[error("unable to read '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid mosque in '{}': {source}", path.display())]
    Parse { path: PathBuf, source: MosqueFactoryError },
    #[error("loader task failed: {0}")]
    Task(#[from] JoinError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env::temp_dir;
    use test_log::test;

    fn resource(path: &str) -> PathBuf {
        PathBuf::from(format!("{}/{}", env!("CARGO_MANIFEST_DIR"), path))
    }

    #[tokio::test]
    async fn list_files_returns_matching_files_sorted_by_name() -> io::Result<()> {
        let dir = temp_dir().join(format!("emaan-list-files-{}", std::process::id()));
        fs::create_dir_all(dir.join("nested.json")).await?;

        let file1 = dir.join("b_mosque.json");
        let file2 = dir.join("no_mosque.txt");
        let file3 = dir.join("a_mosque.json");

        fs::write(&file1, "{}").await?;
        fs::write(&file2, "text").await?;
        fs::write(&file3, "{}").await?;

        let files = list_files(&dir, "json").await?;

        assert_eq!(files, vec![file3, file1]);

        fs::remove_dir_all(&dir).await?;
        Ok(())
    }

    #[test(tokio::test)]
    async fn load_mosques_from_returns_the_bundled_mosques_in_file_order() -> Result<(), LoaderError> {
        let directory = resource("resources/mosques");

        let mosques = load_mosques_from(directory.to_string_lossy().as_ref(), "json").await?;

        let names = mosques.iter().map(|m| m.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["Central Mosque", "Masjid Al-Noor", "Islamic Cultural Center"]);
        Ok(())
    }

    #[test(tokio::test)]
    async fn load_mosques_from_skips_invalid_files() -> Result<(), LoaderError> {
        let directory = resource("tests/resources/mosques");

        let mosques = load_mosques_from(directory.to_string_lossy().as_ref(), "json").await?;

        let ids = mosques.iter().map(|m| m.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["valid-mosque"]);
        Ok(())
    }

    #[test(tokio::test)]
    async fn load_mosques_from_fails_for_a_missing_directory() {
        let result = load_mosques_from("does/not/exist", "json").await;

        let Err(err) = result else {
            panic!("Expected loading a missing directory to fail");
        };
        assert!(matches!(err, LoaderError::ListDirectory { .. }));
        assert!(err.to_string().starts_with("unable to list 'does/not/exist'"), "unexpected message '{}'", err);
    }

    #[test(tokio::test)]
    async fn load_file_names_the_file_with_an_invalid_location() {
        let path = resource("tests/resources/mosques/out_of_range.json");
        assert!(path.is_file(), "expected path to be a file");

        let result = load_file(path.clone()).await;

        let Err(err) = result else {
            panic!("Expected an invalid location error");
        };
        assert!(matches!(
            err,
            LoaderError::Parse {
                source: MosqueFactoryError::InvalidLocation { .. },
                ..
            }
        ));
        assert!(err.to_string().contains(&path.display().to_string()), "unexpected message '{}'", err);
    }

    #[test(tokio::test)]
    async fn load_file_reports_an_unreadable_file() {
        let path = resource("tests/resources/mosques/missing.json");

        let result = load_file(path).await;

        assert!(matches!(result, Err(LoaderError::Read { .. })));
    }
}
