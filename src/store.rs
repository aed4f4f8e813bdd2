use std::{
    io,
    path::{Path, PathBuf},
};

use serde::{
    de::{DeserializeOwned, IgnoredAny},
    Deserialize,
};
use thiserror::Error;
use tokio::fs;

use crate::types::quiz::{Question, Quiz, QuizId, QuizSummary};

const EXTENSION: &str = "json";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no quiz stored under {0}")]
    NotFound(QuizId),
    #[error("quiz {id} is malformed: {source}")]
    Malformed {
        id: QuizId,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Encode(serde_json::Error),
}

/// What a quiz file may look like on disk. Files edited by hand can lack
/// a title or questions; those fall back instead of failing.
#[derive(Deserialize)]
struct StoredQuiz {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    questions: Vec<Question>,
}

/// Just enough of a quiz file to list it.
#[derive(Deserialize)]
struct StoredSummary {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    questions: Vec<IgnoredAny>,
}

/// Flat-file quiz storage: one `<id>.json` per quiz under `root`.
/// Writes are plain overwrites; concurrent writers to the same id race.
#[derive(Clone, Debug)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Store { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, id: &QuizId) -> PathBuf {
        self.root.join(format!("{}.{}", id, EXTENSION))
    }

    /// Every stored id, sorted.
    pub async fn list_ids(&self) -> Result<Vec<QuizId>, StoreError> {
        let mut ids = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            match path.file_stem().and_then(|stem| stem.to_str()) {
                Some(stem) => ids.push(QuizId(stem.to_string())),
                None => log::debug!("skipping non UTF-8 file name {:?}", path),
            }
        }
        ids.sort();
        Ok(ids)
    }

    async fn load<T: DeserializeOwned>(&self, id: &QuizId) -> Result<T, StoreError> {
        let bytes = match fs::read(self.path_for(id)).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(id.clone()))
            }
            Err(err) => return Err(err.into()),
        };
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed {
            id: id.clone(),
            source,
        })
    }

    pub async fn read(&self, id: &QuizId) -> Result<Quiz, StoreError> {
        let stored: StoredQuiz = self.load(id).await?;
        Ok(Quiz {
            title: stored.title.unwrap_or_else(|| id.to_string()),
            questions: stored.questions,
        })
    }

    /// Replaces whatever is stored under `id`. Returns the file written.
    pub async fn write(&self, id: &QuizId, quiz: &Quiz) -> Result<PathBuf, StoreError> {
        let path = self.path_for(id);
        let content = serde_json::to_string_pretty(quiz).map_err(StoreError::Encode)?;
        fs::write(&path, content).await?;
        Ok(path)
    }

    /// One summary per stored id. Only the title and the number of
    /// questions are looked at; a file where those do not parse still gets
    /// a row, with a marker title and no questions.
    pub async fn summaries(&self) -> Result<Vec<QuizSummary>, StoreError> {
        let mut summaries = Vec::new();
        for id in self.list_ids().await? {
            let summary = match self.load::<StoredSummary>(&id).await {
                Ok(stored) => QuizSummary {
                    title: stored.title.unwrap_or_else(|| id.to_string()),
                    num_questions: stored.questions.len(),
                    id,
                },
                Err(err) => {
                    log::warn!("listing {} as invalid: {}", id, err);
                    QuizSummary {
                        title: format!("{} (invalid json)", id),
                        num_questions: 0,
                        id,
                    }
                }
            };
            summaries.push(summary);
        }
        Ok(summaries)
    }
}
