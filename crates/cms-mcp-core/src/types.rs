use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Upper bound on the number of entities a single bulk action may carry.
pub const MAX_BULK_ENTITIES: usize = 100;

/// Space + environment pair every CMS call is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceScope {
    pub space_id: String,
    pub environment_id: String,
}

impl SpaceScope {
    pub fn new(space_id: impl Into<String>, environment_id: impl Into<String>) -> Self {
        Self { space_id: space_id.into(), environment_id: environment_id.into() }
    }
}

impl fmt::Display for SpaceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.space_id, self.environment_id)
    }
}

/// Kind of publishable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Entry,
    Asset,
}

impl EntityKind {
    /// Value used for `sys.linkType`.
    pub fn link_type(&self) -> &'static str {
        match self {
            EntityKind::Entry => "Entry",
            EntityKind::Asset => "Asset",
        }
    }

    /// URL path segment for the collection.
    pub fn path_segment(&self) -> &'static str {
        match self {
            EntityKind::Entry => "entries",
            EntityKind::Asset => "assets",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Entry => "entry",
            EntityKind::Asset => "asset",
        }
    }

    pub fn plural(&self) -> &'static str {
        self.path_segment()
    }

    /// Label used in headline messages, e.g. `Entry(s)`.
    pub fn title(&self) -> &'static str {
        self.link_type()
    }

    /// `entry` for one, `entries` otherwise.
    pub fn noun(&self, count: usize) -> &'static str {
        if count == 1 {
            self.label()
        } else {
            self.plural()
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a link must carry the entity version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkMode {
    /// Optimistic-locking operations (publish).
    Versioned,
    /// Everything else (unpublish, validate).
    Unversioned,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSys {
    #[serde(rename = "type")]
    pub sys_type: String,
    #[serde(rename = "linkType")]
    pub link_type: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

/// Typed reference to an entity as the bulk API expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityLink {
    pub sys: LinkSys,
}

impl EntityLink {
    pub fn versioned(kind: EntityKind, id: impl Into<String>, version: i64) -> Self {
        Self::build(kind, id.into(), Some(version))
    }

    pub fn unversioned(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::build(kind, id.into(), None)
    }

    fn build(kind: EntityKind, id: String, version: Option<i64>) -> Self {
        Self {
            sys: LinkSys {
                sys_type: "Link".to_string(),
                link_type: kind.link_type().to_string(),
                id,
                version,
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.sys.id
    }

    pub fn version(&self) -> Option<i64> {
        self.sys.version
    }

    pub fn satisfies(&self, mode: LinkMode) -> bool {
        match mode {
            LinkMode::Versioned => self.sys.version.is_some(),
            LinkMode::Unversioned => self.sys.version.is_none(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSys {
    #[serde(rename = "type")]
    pub sys_type: String,
}

/// Non-empty, capped list of links wrapped in the `Array` discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitiesCollection {
    sys: CollectionSys,
    items: Vec<EntityLink>,
}

impl EntitiesCollection {
    pub fn new(items: Vec<EntityLink>) -> CoreResult<Self> {
        Self::check_len(items.len())?;
        Ok(Self { sys: CollectionSys { sys_type: "Array".to_string() }, items })
    }

    /// Size rule of a collection, checkable before any link is resolved
    pub fn check_len(len: usize) -> CoreResult<()> {
        if len == 0 {
            return Err(CoreError::Invalid(
                "a bulk action needs at least one entity".to_string(),
            ));
        }
        if len > MAX_BULK_ENTITIES {
            return Err(CoreError::Invalid(format!(
                "a bulk action accepts at most {} entities, got {}",
                MAX_BULK_ENTITIES, len
            )));
        }
        Ok(())
    }

    pub fn items(&self) -> &[EntityLink] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ids(&self) -> Vec<String> {
        self.items.iter().map(|link| link.id().to_string()).collect()
    }
}

/// Mutation a bulk action applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkOperation {
    Publish,
    Unpublish,
    Validate,
}

impl BulkOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            BulkOperation::Publish => "publish",
            BulkOperation::Unpublish => "unpublish",
            BulkOperation::Validate => "validate",
        }
    }

    pub fn link_mode(&self) -> LinkMode {
        match self {
            BulkOperation::Publish => LinkMode::Versioned,
            BulkOperation::Unpublish | BulkOperation::Validate => LinkMode::Unversioned,
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            BulkOperation::Publish => "published",
            BulkOperation::Unpublish => "unpublished",
            BulkOperation::Validate => "validated",
        }
    }
}

impl fmt::Display for BulkOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BulkActionStatus {
    Created,
    InProgress,
    Succeeded,
    Failed,
}

impl BulkActionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BulkActionStatus::Created => "created",
            BulkActionStatus::InProgress => "inProgress",
            BulkActionStatus::Succeeded => "succeeded",
            BulkActionStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BulkActionStatus::Succeeded | BulkActionStatus::Failed)
    }
}

impl fmt::Display for BulkActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server-side bulk job. Only ever mutated by re-fetching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkAction {
    pub id: String,
    pub status: BulkActionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonValue>,
}

impl BulkAction {
    pub fn new(id: impl Into<String>, status: BulkActionStatus) -> Self {
        Self { id: id.into(), status, error: None }
    }

    pub fn with_error(mut self, error: JsonValue) -> Self {
        self.error = Some(error);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn versioned_link_serializes_version() {
        let link = EntityLink::versioned(EntityKind::Entry, "a", 7);
        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(
            value,
            json!({"sys": {"type": "Link", "linkType": "Entry", "id": "a", "version": 7}})
        );
        assert!(link.satisfies(LinkMode::Versioned));
        assert!(!link.satisfies(LinkMode::Unversioned));
    }

    #[test]
    fn unversioned_link_omits_version() {
        let link = EntityLink::unversioned(EntityKind::Asset, "img");
        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(value, json!({"sys": {"type": "Link", "linkType": "Asset", "id": "img"}}));
        assert!(link.satisfies(LinkMode::Unversioned));
    }

    #[test]
    fn collection_rejects_empty_and_oversized() {
        assert!(EntitiesCollection::new(vec![]).is_err());

        let too_many: Vec<EntityLink> = (0..=MAX_BULK_ENTITIES)
            .map(|i| EntityLink::unversioned(EntityKind::Entry, format!("e{i}")))
            .collect();
        let err = EntitiesCollection::new(too_many).unwrap_err();
        assert!(err.to_string().contains("at most 100"));
    }

    #[test]
    fn size_check_runs_without_links() {
        assert!(EntitiesCollection::check_len(0).is_err());
        assert!(EntitiesCollection::check_len(1).is_ok());
        assert!(EntitiesCollection::check_len(MAX_BULK_ENTITIES).is_ok());
        let err = EntitiesCollection::check_len(150).unwrap_err();
        assert_eq!(err.to_string(), "invalid: a bulk action accepts at most 100 entities, got 150");
    }

    #[test]
    fn collection_accepts_exactly_the_cap() {
        let items: Vec<EntityLink> = (0..MAX_BULK_ENTITIES)
            .map(|i| EntityLink::unversioned(EntityKind::Entry, format!("e{i}")))
            .collect();
        let collection = EntitiesCollection::new(items).unwrap();
        assert_eq!(collection.len(), MAX_BULK_ENTITIES);
        let value = serde_json::to_value(&collection).unwrap();
        assert_eq!(value["sys"]["type"], "Array");
        assert_eq!(value["items"].as_array().unwrap().len(), MAX_BULK_ENTITIES);
    }

    #[test]
    fn bulk_status_terminality() {
        assert!(!BulkActionStatus::Created.is_terminal());
        assert!(!BulkActionStatus::InProgress.is_terminal());
        assert!(BulkActionStatus::Succeeded.is_terminal());
        assert!(BulkActionStatus::Failed.is_terminal());

        let parsed: BulkActionStatus = serde_json::from_value(json!("inProgress")).unwrap();
        assert_eq!(parsed, BulkActionStatus::InProgress);
    }

    #[test]
    fn operation_link_modes() {
        assert_eq!(BulkOperation::Publish.link_mode(), LinkMode::Versioned);
        assert_eq!(BulkOperation::Unpublish.link_mode(), LinkMode::Unversioned);
        assert_eq!(BulkOperation::Validate.link_mode(), LinkMode::Unversioned);
    }

    #[test]
    fn entity_kind_nouns() {
        assert_eq!(EntityKind::Entry.noun(1), "entry");
        assert_eq!(EntityKind::Entry.noun(2), "entries");
        assert_eq!(EntityKind::Asset.noun(0), "assets");
    }
}
