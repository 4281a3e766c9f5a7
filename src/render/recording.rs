//! Render target that only records the commands it receives.

use crate::catalog::coords::Position;

use super::{ProjectionMode, RenderTarget};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Command {
    Clear,
    Add { handle: u32, label: String, position: Position },
    Select(u32),
    FlyTo(u32, f32),
    Morph(ProjectionMode, f32),
}

#[derive(Debug, Default)]
pub(crate) struct RecordingRenderer {
    pub commands: Vec<Command>,
    next: u32,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fly_tos(&self) -> Vec<u32> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::FlyTo(h, _) => Some(*h),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Command) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl RenderTarget for RecordingRenderer {
    type Handle = u32;

    fn clear_all_entities(&mut self) {
        self.commands.push(Command::Clear);
    }

    fn add_entity(&mut self, position: Position, label: &str, _description: &str) -> u32 {
        self.next += 1;
        self.commands.push(Command::Add {
            handle: self.next,
            label: label.to_string(),
            position,
        });
        self.next
    }

    fn set_selected_entity(&mut self, handle: u32) {
        self.commands.push(Command::Select(handle));
    }

    fn fly_to_entity(&mut self, handle: u32, duration_secs: f32) {
        self.commands.push(Command::FlyTo(handle, duration_secs));
    }

    fn morph_projection(&mut self, target: ProjectionMode, duration_secs: f32) {
        self.commands.push(Command::Morph(target, duration_secs));
    }
}
