//! Cooperative chunk meshing.
//!
//! A [`MeshTask`] walks every direction and every slice of one chunk, but
//! only processes about [`MesherConfig::yield_budget`] mask cells per
//! [`MeshTask::step`] before handing control back. Hosts drive it from a
//! frame loop with `step`, await it as a [`Future`], or call
//! [`MeshTask::run`] on a dedicated worker.

use crate::atlas::TextureAtlas;
use crate::chunk::Chunk;
use crate::mesh_output::ChunkGeometry;
use crate::mesher::emitter::MeshBuffers;
use crate::mesher::greedy::{merge_slice_into, MergedQuad};
use crate::mesher::mask::SliceMask;
use crate::mesher::MesherConfig;
use crate::types::Direction;
use crate::world::VoxelSource;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Outcome of one [`MeshTask::step`].
#[derive(Debug)]
pub enum TaskStep {
    /// The work budget ran out; call `step` again to continue.
    Yielded,
    /// Every direction is done.
    Complete(ChunkGeometry),
}

/// How far a task has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskProgress {
    /// Direction currently being swept, `None` once all are done.
    pub direction: Option<Direction>,
    /// Next slice of that direction.
    pub slice: usize,
    /// Mask cells processed so far.
    pub cells_processed: usize,
    /// Times the task has yielded.
    pub yields: usize,
}

/// In-flight state. Dropped as a whole on completion or cancellation, so
/// partial buffers are never published.
struct Running {
    direction: usize,
    slice: usize,
    mask: SliceMask,
    quads: Vec<MergedQuad>,
    buffers: MeshBuffers,
    cells_processed: usize,
    yields: usize,
}

/// Greedy meshing of one chunk, resumable between slices.
///
/// Dropping an unfinished task cancels it.
pub struct MeshTask<'a, S: ?Sized, A: ?Sized> {
    chunk: &'a Chunk,
    source: &'a S,
    atlas: &'a A,
    config: MesherConfig,
    state: Option<Running>,
}

impl<'a, S, A> MeshTask<'a, S, A>
where
    S: VoxelSource + ?Sized,
    A: TextureAtlas + ?Sized,
{
    pub fn new(chunk: &'a Chunk, source: &'a S, atlas: &'a A, config: MesherConfig) -> Self {
        let first = Direction::ALL[0];
        let state = Running {
            direction: 0,
            slice: 0,
            mask: SliceMask::for_direction(first),
            quads: Vec::new(),
            buffers: MeshBuffers::with_capacity(config.vertex_capacity),
            cells_processed: 0,
            yields: 0,
        };
        Self {
            chunk,
            source,
            atlas,
            config,
            state: Some(state),
        }
    }

    /// Whether the task has already produced its geometry.
    pub fn is_complete(&self) -> bool {
        self.state.is_none()
    }

    pub fn progress(&self) -> TaskProgress {
        match &self.state {
            Some(run) => TaskProgress {
                direction: Direction::ALL.get(run.direction).copied(),
                slice: run.slice,
                cells_processed: run.cells_processed,
                yields: run.yields,
            },
            None => TaskProgress {
                direction: None,
                slice: 0,
                cells_processed: 0,
                yields: 0,
            },
        }
    }

    /// Process slices until the work budget is spent or the chunk is done.
    ///
    /// # Panics
    ///
    /// Panics if called again after returning [`TaskStep::Complete`].
    pub fn step(&mut self) -> TaskStep {
        let budget = self.config.yield_budget.max(1);
        let origin = self.origin();
        let run = self
            .state
            .as_mut()
            .unwrap_or_else(|| {
                panic!("MeshTask for chunk {:?} stepped after completion", self.chunk.pos())
            });

        let mut spent = 0;
        while run.direction < Direction::ALL.len() {
            let direction = Direction::ALL[run.direction];
            let (w_max, _, _) = direction.sweep_range();

            run.mask.build(
                self.chunk,
                self.source,
                direction,
                run.slice,
                self.config.world_limit_faces,
            );
            run.quads.clear();
            merge_slice_into(&mut run.mask, direction, run.slice, &mut run.quads);
            for quad in &run.quads {
                run.buffers.emit_quad(quad, self.atlas, origin);
            }

            let cells = run.mask.len();
            run.cells_processed += cells;
            spent += cells;

            run.slice += 1;
            if run.slice > w_max {
                log::trace!(
                    "chunk {:?}: {} done, {} quads, {} vertices so far",
                    self.chunk.pos(),
                    direction,
                    run.buffers.quad_counts()[direction.index()],
                    run.buffers.vertex_count()
                );
                run.direction += 1;
                run.slice = 0;
                if let Some(&next) = Direction::ALL.get(run.direction) {
                    run.mask = SliceMask::for_direction(next);
                }
            }

            if spent >= budget && run.direction < Direction::ALL.len() {
                run.yields += 1;
                log::trace!(
                    "chunk {:?}: yielding after {} cells ({} total)",
                    self.chunk.pos(),
                    spent,
                    run.cells_processed
                );
                return TaskStep::Yielded;
            }
        }

        let Some(run) = self.state.take() else {
            unreachable!("state checked above");
        };
        let geometry = run.buffers.finish(self.chunk.pos());
        log::debug!(
            "meshed chunk {:?}: quads {:?}, {} vertices, {} indices, {} cells, {} yields",
            self.chunk.pos(),
            geometry.quad_counts(),
            geometry.vertex_count(),
            geometry.indices().len(),
            run.cells_processed,
            run.yields
        );
        TaskStep::Complete(geometry)
    }

    /// Step until done, ignoring yield points.
    pub fn run(mut self) -> ChunkGeometry {
        loop {
            if let TaskStep::Complete(geometry) = self.step() {
                return geometry;
            }
        }
    }

    /// Abandon the task, discarding everything built so far.
    pub fn cancel(self) {
        drop(self);
    }

    fn origin(&self) -> [f32; 3] {
        if self.config.world_space {
            let origin = self.chunk.pos().world_origin();
            [origin.x as f32, origin.y as f32, origin.z as f32]
        } else {
            [0.0; 3]
        }
    }
}

impl<S: ?Sized, A: ?Sized> Drop for MeshTask<'_, S, A> {
    fn drop(&mut self) {
        if let Some(run) = &self.state {
            log::debug!(
                "cancelled meshing of chunk {:?} after {} cells, discarding {} vertices",
                self.chunk.pos(),
                run.cells_processed,
                run.buffers.vertex_count()
            );
        }
    }
}

impl<S, A> Future for MeshTask<'_, S, A>
where
    S: VoxelSource + ?Sized,
    A: TextureAtlas + ?Sized,
{
    type Output = ChunkGeometry;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match this.step() {
            TaskStep::Yielded => {
                cx.waker().wake_by_ref();
                Poll::Pending
            }
            TaskStep::Complete(geometry) => Poll::Ready(geometry),
        }
    }
}
