use crate::domain::trace::Step;

pub mod flowchart_exporter;

/// Renders a finished trace for output.
pub trait TraceExporter {
    fn render(&self, steps: &[Step]) -> anyhow::Result<String>;

    fn export(&self, steps: &[Step], path: &str) -> anyhow::Result<()> {
        let content = self.render(steps)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
