//! Synth Service - the synthesis driver.
//!
//! Walks the project tree from the root and, for every project:
//! 1. Call the project's `pre_synthesize` hook
//! 2. Clean up output of the previous run below the project's outdir
//! 3. Synthesize every sub-project, in registration order
//! 4. Call `synthesize` on every own component, in registration order
//! 5. Call `post_synthesize` on every own component
//! 6. Call the project's `post_synthesize` hook
//! 7. Hand the list of generated files to the cleanup collaborator
//!
//! Nothing is caught: the first error aborts the whole run and the next
//! run's cleanup reconciles whatever was left behind.

use std::path::PathBuf;

use tracing::{debug, info, instrument, trace};

use crate::{
    application::{
        SynthContext,
        ports::{Cleanup, Filesystem},
    },
    domain::{ComponentKind, ProjectId, ProjectTree, StartMenu},
    error::TrellisResult,
};

/// Outcome of a successful root-level synthesis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynthReport {
    /// Advisory messages of every project, root first.
    pub tips: Vec<String>,
    /// Set when the root owns a start-menu component.
    pub start: Option<StartMenu>,
    /// Absolute paths of every tracked file written in this run.
    pub generated: Vec<PathBuf>,
    /// Number of projects synthesized.
    pub projects: usize,
}

/// Main synthesis service.
pub struct SynthService {
    filesystem: Box<dyn Filesystem>,
    cleanup: Box<dyn Cleanup>,
}

impl SynthService {
    /// Create a new synth service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use trellis_core::application::SynthService;
    /// # use trellis_core::application::ports::{Cleanup, Filesystem};
    /// # let filesystem: Box<dyn Filesystem> = unimplemented!();
    /// # let cleanup: Box<dyn Cleanup> = unimplemented!();
    ///
    /// let service = SynthService::new(
    ///     filesystem, // impl Filesystem
    ///     cleanup,    // impl Cleanup
    /// );
    /// ```
    pub fn new(filesystem: Box<dyn Filesystem>, cleanup: Box<dyn Cleanup>) -> Self {
        Self {
            filesystem,
            cleanup,
        }
    }

    /// Synthesize the whole tree, starting at its root.
    ///
    /// Sub-projects are never synthesized on their own; this is the only
    /// entry point.
    #[instrument(skip_all, fields(projects = tree.len()))]
    pub fn synth(&self, tree: &mut ProjectTree) -> TrellisResult<SynthReport> {
        let root = tree.root_id();
        info!(outdir = %tree.outdir(root)?.display(), "Synthesis started");

        let mut report = SynthReport {
            projects: tree.len(),
            ..SynthReport::default()
        };
        self.synth_project(tree, root, &mut report.generated)?;

        info!(files = report.generated.len(), "Synthesis complete");

        report.tips = tree.collect_tips();
        report.start = tree
            .project(root)?
            .component_kinds()
            .find_map(|kind| match kind {
                ComponentKind::Start(menu) => Some(menu.clone()),
                ComponentKind::Plain | ComponentKind::File(_) => None,
            });

        Ok(report)
    }

    fn synth_project(
        &self,
        tree: &mut ProjectTree,
        id: ProjectId,
        all_generated: &mut Vec<PathBuf>,
    ) -> TrellisResult<()> {
        let outdir = tree.outdir(id)?.to_path_buf();
        let mut generated = Vec::new();
        debug!(project = %id, outdir = %outdir.display(), "Synthesizing project");

        {
            let node = tree.project_mut(id)?;
            let mut ctx = SynthContext::new(id, &outdir, self.filesystem.as_ref(), &mut generated);
            node.hooks.pre_synthesize(&mut ctx)?;
        }

        // Child outdirs are nested inside ours, so this also wipes every
        // sub-project's previous output before any of it is regenerated.
        self.cleanup.cleanup(&outdir)?;

        let subprojects = tree.project(id)?.subprojects().to_vec();
        for child in subprojects {
            self.synth_project(tree, child, all_generated)?;
        }

        let node = tree.project_mut(id)?;
        let mut ctx = SynthContext::new(id, &outdir, self.filesystem.as_ref(), &mut generated);

        for entry in node.components.iter_mut() {
            trace!(component = entry.component.name(), "synthesize");
            entry.component.synthesize(&mut ctx)?;
        }

        for entry in node.components.iter_mut() {
            trace!(component = entry.component.name(), "post_synthesize");
            entry.component.post_synthesize(&mut ctx)?;
        }

        node.hooks.post_synthesize(&mut ctx)?;

        generated.sort();
        generated.dedup();
        self.cleanup.track(&outdir, &generated)?;

        debug!(project = %id, files = generated.len(), "Project synthesized");
        all_generated.extend(generated);
        Ok(())
    }
}
