use crate::error::{ToolError, ToolResult};
use cms_mcp_core::{EntityKind, EntityLink, EntityReader, LinkMode, SpaceScope};

/// Turns identifiers into the links a bulk action carries.
pub struct EntityLinkResolver<'a, R: EntityReader + ?Sized> {
    reader: &'a R,
}

impl<'a, R: EntityReader + ?Sized> EntityLinkResolver<'a, R> {
    pub fn new(reader: &'a R) -> Self {
        Self { reader }
    }

    /// One link per id, in input order. The first failed version lookup aborts.
    pub async fn resolve(
        &self,
        scope: &SpaceScope,
        kind: EntityKind,
        ids: &[String],
        mode: LinkMode,
    ) -> ToolResult<Vec<EntityLink>> {
        let mut links = Vec::with_capacity(ids.len());
        for id in ids {
            let link = match mode {
                LinkMode::Unversioned => EntityLink::unversioned(kind, id.as_str()),
                LinkMode::Versioned => {
                    let version = self
                        .reader
                        .current_version(scope, kind, id)
                        .await
                        .map_err(|source| ToolError::Resolve { kind, id: id.clone(), source })?;
                    EntityLink::versioned(kind, id.as_str(), version)
                }
            };
            links.push(link);
        }
        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cms_mcp_core::{CoreError, CoreResult};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Versions {
        lookups: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl EntityReader for Versions {
        async fn current_version(
            &self,
            _scope: &SpaceScope,
            _kind: EntityKind,
            id: &str,
        ) -> CoreResult<i64> {
            self.lookups.lock().unwrap().push(id.to_string());
            match id {
                "missing" => Err(CoreError::remote(Some(404), "The resource could not be found.")),
                other => Ok(other.len() as i64),
            }
        }
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn versioned_links_follow_input_order() {
        let reader = Versions::default();
        let scope = SpaceScope::new("s", "master");
        let links = EntityLinkResolver::new(&reader)
            .resolve(&scope, EntityKind::Entry, &ids(&["a", "bb", "ccc"]), LinkMode::Versioned)
            .await
            .unwrap();

        let resolved: Vec<_> = links.iter().map(|l| (l.id().to_string(), l.version())).collect();
        assert_eq!(
            resolved,
            vec![("a".into(), Some(1)), ("bb".into(), Some(2)), ("ccc".into(), Some(3))]
        );
        assert!(links.iter().all(|l| l.satisfies(LinkMode::Versioned)));
    }

    #[tokio::test]
    async fn unversioned_links_skip_lookups() {
        let reader = Versions::default();
        let scope = SpaceScope::new("s", "master");
        let links = EntityLinkResolver::new(&reader)
            .resolve(&scope, EntityKind::Asset, &ids(&["a", "b"]), LinkMode::Unversioned)
            .await
            .unwrap();

        assert_eq!(links.len(), 2);
        assert!(links.iter().all(|l| l.satisfies(LinkMode::Unversioned)));
        assert!(reader.lookups.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn lookup_failure_aborts_resolution() {
        let reader = Versions::default();
        let scope = SpaceScope::new("s", "master");
        let err = EntityLinkResolver::new(&reader)
            .resolve(&scope, EntityKind::Entry, &ids(&["a", "missing", "c"]), LinkMode::Versioned)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to resolve entry missing: The resource could not be found.");
        assert_eq!(*reader.lookups.lock().unwrap(), ids(&["a", "missing"]));
    }
}
