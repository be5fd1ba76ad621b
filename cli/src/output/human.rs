//! Human-readable terminal renderer.

use chrono::SecondsFormat;
use owo_colors::OwoColorize as _;

use crate::domain::instance::InstanceRecord;
use crate::output::OutputContext;

/// Shown instead of a timestamp for instances that were never started or stopped.
pub const NEVER_ACCESSED: &str = "---Configured only. Never accessed.---";

/// Renders registry contents as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render every configured instance.
    ///
    /// In quiet mode only the labels are printed, one per line.
    pub fn render_instances(&self, instances: &[(&str, &InstanceRecord)]) {
        if self.ctx.quiet {
            for (label, _) in instances {
                println!("{label}");
            }
            return;
        }
        if instances.is_empty() {
            self.ctx.info("No instances are currently configured.");
            return;
        }

        self.ctx.header("Configured Instances:");
        for (label, record) in instances {
            println!();
            println!("  {}", label.style(self.ctx.styles.label));
            self.ctx.kv("  AWS Profile:   ", &record.profile);
            self.ctx.kv("  Instance ID:   ", &record.remote_id);
            self.ctx.kv("  PEM File:      ", &record.key_file.display().to_string());
            self.ctx.kv("  User:          ", &record.ssh_user);
            self.ctx.kv(
                "  Use Private IP:",
                if record.prefer_private_address { "true" } else { "false" },
            );
            self.ctx.kv("  Last Accessed: ", &last_accessed_display(record));
        }
    }
}

/// `last_accessed` as shown in listings.
#[must_use]
pub fn last_accessed_display(record: &InstanceRecord) -> String {
    record.last_accessed_at.map_or_else(
        || NEVER_ACCESSED.to_string(),
        |ts| ts.to_rfc3339_opts(SecondsFormat::Secs, true),
    )
}
