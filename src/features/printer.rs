//! Printer front end
//!
//! Composes the table layout engine with a [`PrintDevice`]. The device, and
//! through it the print target, is injected at construction.

use super::device::{PrintDevice, PrintStatus, PrintTarget};
use crate::core::compiler::{HashNode, TreeCompiler};
use crate::core::layout::{LayoutNode, LayoutOptions, TableLayoutEngine};
use crate::utils::error::RenderResult;

/// Lays out hash-trees and prints them on a device
pub struct Printer<T: PrintTarget> {
    device: PrintDevice<T>,
    engine: TableLayoutEngine,
}

impl<T: PrintTarget> Printer<T> {
    pub fn new(device: PrintDevice<T>, options: LayoutOptions) -> Self {
        Self {
            device,
            engine: TableLayoutEngine::new(options),
        }
    }

    pub fn options(&self) -> &LayoutOptions {
        self.engine.options()
    }

    pub fn device(&self) -> &PrintDevice<T> {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut PrintDevice<T> {
        &mut self.device
    }

    pub fn into_device(self) -> PrintDevice<T> {
        self.device
    }

    /// Lay out `tree` into synchronized, padded rows
    pub fn pretreat(&self, tree: &[HashNode]) -> LayoutNode {
        self.engine.pretreat(tree)
    }

    /// Layout step of [`Printer::print`]
    pub fn prepare(&self, tree: &[HashNode]) -> LayoutNode {
        self.pretreat(tree)
    }

    /// Lay out and print a hash-tree.
    ///
    /// An empty tree prints nothing. Device failures are reported through
    /// [`PrintStatus::Failed`].
    pub fn print(&mut self, tree: &[HashNode]) -> PrintStatus {
        let root = self.prepare(tree);
        self.device.print(&root)
    }

    /// Compile markup with the default vocabulary and print it
    pub fn print_markup(&mut self, markup: &str) -> RenderResult<PrintStatus> {
        let tree = TreeCompiler::new(markup)?.run();
        Ok(self.print(&tree))
    }
}
