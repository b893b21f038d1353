use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;

/// Something that can turn a resource name into its raw text, such as a folder
/// on disk or a set of bundled assets.
#[async_trait]
pub trait ResourceProvider: Send + Sync {
    /// Fetches the full text of the resource called `name`.
    async fn fetch(&self, name: &str) -> Result<String, ResourceError>;
}

#[async_trait]
impl<T: ResourceProvider + ?Sized> ResourceProvider for &T {
    async fn fetch(&self, name: &str) -> Result<String, ResourceError> {
        (**self).fetch(name).await
    }
}

#[async_trait]
impl<T: ResourceProvider + ?Sized> ResourceProvider for Box<T> {
    async fn fetch(&self, name: &str) -> Result<String, ResourceError> {
        (**self).fetch(name).await
    }
}

#[async_trait]
impl<T: ResourceProvider + ?Sized> ResourceProvider for Arc<T> {
    async fn fetch(&self, name: &str) -> Result<String, ResourceError> {
        (**self).fetch(name).await
    }
}

/// An in-memory set of resources. Useful for text bundled with `include_str!`.
#[derive(Debug, Default, Clone)]
pub struct MemoryProvider(HashMap<String, String>);

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a resource, returning the previous text if there was one.
    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), text.into())
    }

    /// Builder flavour of [MemoryProvider::insert].
    pub fn with(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(name, text);
        self
    }
}

#[async_trait]
impl ResourceProvider for MemoryProvider {
    async fn fetch(&self, name: &str) -> Result<String, ResourceError> {
        self.0
            .get(name)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(name.to_owned()))
    }
}

#[cfg(feature = "fs")]
pub use fs::FsProvider;

#[cfg(feature = "fs")]
mod fs {
    use std::{io, path::PathBuf};

    use async_trait::async_trait;

    use super::{ResourceError, ResourceProvider};

    const DEFAULT_FOLDER: &str = "Localization";
    const DEFAULT_EXTENSION: &str = "tsv";

    /// Reads resources from `<root>/<name>.<extension>`.
    #[derive(Debug, Clone)]
    pub struct FsProvider {
        root: PathBuf,
        extension: Option<String>,
    }

    impl Default for FsProvider {
        fn default() -> Self {
            Self {
                root: PathBuf::from(DEFAULT_FOLDER),
                extension: Some(DEFAULT_EXTENSION.to_owned()),
            }
        }
    }

    impl FsProvider {
        /// Creates a provider rooted at `root`, looking for `.tsv` files.
        pub fn new(root: impl Into<PathBuf>) -> Self {
            Self {
                root: root.into(),
                ..Self::default()
            }
        }

        /// Sets the extension appended to every name. `None` uses the name as is.
        pub fn extension(mut self, extension: Option<&str>) -> Self {
            self.extension = extension.map(str::to_owned);
            self
        }

        pub fn path_for(&self, name: &str) -> PathBuf {
            match &self.extension {
                Some(ext) => self.root.join(format!("{name}.{ext}")),
                None => self.root.join(name),
            }
        }
    }

    #[async_trait]
    impl ResourceProvider for FsProvider {
        async fn fetch(&self, name: &str) -> Result<String, ResourceError> {
            let path = self.path_for(name);

            match tokio::fs::read(&path).await {
                Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    Err(ResourceError::NotFound(name.to_owned()))
                }
                Err(source) => Err(ResourceError::Io {
                    name: name.to_owned(),
                    source,
                }),
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("resource `{0}` was not found")]
    NotFound(String),
    #[error("could not read resource `{name}`: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}
