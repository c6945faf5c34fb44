//! Ordered asynchronous hand-off to a renderer task.

use std::path::{Path, PathBuf};

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use super::{ArticulationObject, DrawRecord, GeometrySink, PolylineObject};

/// A request forwarded to the consumer.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Create an object.
    Draw {
        /// Handle already returned to the producer.
        handle: u64,
        /// The object.
        record: DrawRecord,
    },
    /// Render the scene into a frame file.
    RenderFrame {
        /// Target path.
        path: PathBuf,
    },
}

/// Sink that never blocks the traversal.
///
/// Handles are assigned synchronously and sequentially, so the consumer
/// observes commands in exactly the order they were produced.
#[derive(Debug)]
pub struct QueuedSink {
    sender: UnboundedSender<DrawCommand>,
    next_handle: u64,
}

/// Creates a queued sink and the receiver a renderer task drains.
pub fn queued_sink() -> (QueuedSink, UnboundedReceiver<DrawCommand>) {
    let (sender, receiver) = unbounded_channel();
    (
        QueuedSink {
            sender,
            next_handle: 0,
        },
        receiver,
    )
}

impl QueuedSink {
    fn send(&self, command: DrawCommand) {
        if self.sender.send(command).is_err() {
            log::warn!("draw queue closed, dropping command");
        }
    }

    fn draw(&mut self, record: DrawRecord) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.send(DrawCommand::Draw { handle, record });
        handle
    }
}

impl GeometrySink for QueuedSink {
    type Handle = u64;

    fn draw_polyline(&mut self, object: PolylineObject<'_>) -> u64 {
        self.draw(object.into())
    }

    fn draw_articulation(&mut self, object: ArticulationObject<'_>) -> u64 {
        self.draw(object.into())
    }

    fn render_frame(&mut self, path: &Path) {
        self.send(DrawCommand::RenderFrame {
            path: path.to_path_buf(),
        });
    }
}
