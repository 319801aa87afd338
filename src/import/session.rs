//! Import session orchestration.
//!
//! One session scans a world, runs the exporter over the changed groups and
//! feeds the resulting geometry to a [`SceneTarget`], nearest groups first.
//! Timestamps are committed once, after every group has been imported; a
//! failure anywhere leaves the previously committed state as it was.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::core::{Error, Result};
use crate::export::{ExportPlan, GeometryExporter, PlanBuilder};
use crate::grouping::{GroupCoord, GroupData};
use crate::import::config::ImportConfig;
use crate::import::progress::{Progress, Stage};
use crate::material::{classify_tokens, MaterialGroupKey, NameTokens, SharedMaterialCache};
use crate::scene::{
    group_placement, light_placeholder, BakeRequest, PieceBinding, SceneTarget,
};
use crate::timestamps::{TimestampPersistence, TimestampStore};
use crate::world::WorldReader;

/// Directory the exporter writes group geometry into
pub const GROUPS_DIRNAME: &str = "Groups";

/// File name of the generated export script
pub const SCRIPT_FILENAME: &str = "Script.mwscript";

/// Outcome of a successful session
#[derive(Clone, Debug, PartialEq)]
pub struct ImportReport {
    pub chunks_scanned: usize,
    pub chunks_updated: usize,
    pub groups_imported: usize,
    pub elapsed: Duration,
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scanned {} chunks, {} new or updated, imported {} groups in {:.2?}",
            self.chunks_scanned, self.chunks_updated, self.groups_imported, self.elapsed
        )
    }
}

/// A single import of one world
pub struct ImportSession<P: TimestampPersistence> {
    config: ImportConfig,
    persistence: P,
    store: TimestampStore,
    materials: SharedMaterialCache,
}

impl<P: TimestampPersistence> ImportSession<P> {
    /// Start a session, loading the committed timestamps from `persistence`
    pub fn open(config: ImportConfig, persistence: P) -> Result<Self> {
        config.validate()?;
        let store = TimestampStore::load(&persistence, config.group_size)?;
        Ok(Self {
            config,
            persistence,
            store,
            materials: SharedMaterialCache::new(),
        })
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    pub fn store(&self) -> &TimestampStore {
        &self.store
    }

    /// Bring the scene up to date with the world at `world`.
    ///
    /// Consumes the session so the timestamp commit can only happen once.
    pub async fn sync_world<R, E, S, G>(
        self,
        world: &Path,
        reader: &R,
        exporter: &E,
        scene: &mut S,
        progress: &mut G,
    ) -> Result<ImportReport>
    where
        R: WorldReader,
        E: GeometryExporter,
        S: SceneTarget,
        G: Progress,
    {
        let result = self.run(world, reader, exporter, scene, progress).await;
        match &result {
            Ok(_) => progress.done(),
            Err(e) => progress.failed(&e.to_string()),
        }
        result
    }

    async fn run<R, E, S, G>(
        mut self,
        world: &Path,
        reader: &R,
        exporter: &E,
        scene: &mut S,
        progress: &mut G,
    ) -> Result<ImportReport>
    where
        R: WorldReader,
        E: GeometryExporter,
        S: SceneTarget,
        G: Progress,
    {
        progress.update(None, Stage::SearchingExporter, "");
        exporter.ensure_available()?;

        let start = Instant::now();
        let session_dir = self.config.staging_dir.join(Uuid::new_v4().to_string());
        let groups_dir = session_dir.join(GROUPS_DIRNAME);

        progress.update(None, Stage::AnalyzingData, &world.display().to_string());
        let plan = self.plan(world, &groups_dir, reader).await?;

        if plan.is_empty() {
            log::info!("No changed chunks in {}", world.display());
        } else {
            progress.update(None, Stage::WritingScript, "");
            tokio::fs::create_dir_all(&groups_dir).await?;
            let script_path = session_dir.join(SCRIPT_FILENAME);
            tokio::fs::write(&script_path, plan.script.render()).await?;

            progress.update(
                None,
                Stage::ExportingGeometry,
                &format!("{} groups", plan.script.region_count()),
            );
            exporter.export(&script_path).await?;
        }

        let groups = plan.groups.into_distance_order();
        let total = groups.len();
        for (index, (group, data)) in groups.iter().enumerate() {
            progress.update(
                Some(index as f32 / total as f32),
                Stage::ImportingGroups,
                &group.to_string(),
            );
            self.import_group(*group, data, scene)
                .map_err(|e| Error::group(*group, e))?;
        }

        // the scene must be durable before its chunks count as imported
        scene.flush()?;
        let written = self.store.commit(&mut self.persistence)?;
        log::debug!("Committed timestamps for {} groups", written);

        if !self.config.keep_staging {
            remove_staging(&session_dir).await;
        }

        let report = ImportReport {
            chunks_scanned: self.store.chunks_scanned(),
            chunks_updated: self.store.chunks_updated(),
            groups_imported: total,
            elapsed: start.elapsed(),
        };
        log::info!("{}", report);

        Ok(report)
    }

    /// Scan the world on the blocking pool; the store travels with the scan.
    async fn plan<R: WorldReader>(
        &mut self,
        world: &Path,
        groups_dir: &Path,
        reader: &R,
    ) -> Result<ExportPlan> {
        let chunks = reader.open(world)?;
        let builder = PlanBuilder::new(world, groups_dir)
            .with_group_size(self.config.group_size)
            .with_chunk_size(self.config.chunk_size)
            .with_world_height(self.config.world_height);

        let mut store = std::mem::replace(&mut self.store, TimestampStore::new(self.config.group_size));
        let (plan, store) = tokio::task::spawn_blocking(move || {
            let plan = builder.build(chunks, &mut store);
            (plan, store)
        })
        .await
        .map_err(|e| Error::WorldUnreadable {
            path: world.to_path_buf(),
            reason: format!("scan task failed: {}", e),
        })?;

        self.store = store;
        plan
    }

    fn import_group<S: SceneTarget>(
        &mut self,
        group: GroupCoord,
        data: &GroupData,
        scene: &mut S,
    ) -> Result<()> {
        let group_size = self.config.group_size;
        scene.reset_group(&group_placement(
            group,
            group_size,
            self.config.render_distance,
            self.config.culling_height_offset,
        ))?;

        let pieces = scene.load_geometry(group, &data.file)?;

        let mut buckets: BTreeMap<MaterialGroupKey, Vec<PieceBinding>> = BTreeMap::new();
        for piece in pieces {
            let tokens = NameTokens::split(&piece.name);
            let key = classify_tokens(&piece.name, &tokens);
            log::debug!("Classification {} - {}", piece.name, key);

            let mut materials = Vec::with_capacity(piece.materials.len());
            for name in &piece.materials {
                materials.push(self.materials.get_or_create(name, key, &mut *scene)?);
            }

            buckets.entry(key).or_default().push(PieceBinding {
                piece: piece.id,
                materials,
            });
        }

        for (key, pieces) in buckets {
            scene.bake(&BakeRequest {
                group,
                key,
                pieces,
                collider: key.collidable,
            })?;
        }

        for &local in &data.light_sources {
            scene.place_light(group, &light_placeholder(local, group_size, &self.config.light))?;
        }

        scene.release_sources(group)
    }
}

async fn remove_staging(dir: &Path) {
    if !dir.exists() {
        return;
    }
    if let Err(e) = tokio::fs::remove_dir_all(dir).await {
        log::warn!("Failed to remove staging directory {}: {}", dir.display(), e);
    }
}
