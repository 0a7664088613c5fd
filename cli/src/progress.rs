//! Progress reporting for consultation execution

use aida_application::ports::progress::{ConsultationPhase, ConsultationProgress};
use aida_domain::AgentKind;
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress during a consultation with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }

    fn phase_display_name(phase: ConsultationPhase) -> &'static str {
        match phase {
            ConsultationPhase::Intake => "Phase 1: Intake",
            ConsultationPhase::Analysis => "Phase 2: Specialist Analysis",
            ConsultationPhase::Consensus => "Phase 3: Consensus",
        }
    }

    fn phase_short_name(phase: ConsultationPhase) -> &'static str {
        match phase {
            ConsultationPhase::Intake => "Phase 1",
            ConsultationPhase::Analysis => "Phase 2",
            ConsultationPhase::Consensus => "Phase 3",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsultationProgress for ProgressReporter {
    fn on_phase_start(&self, phase: ConsultationPhase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(Self::phase_display_name(phase));
        pb.set_message("Starting...");

        *self.phase_bar.lock().unwrap() = Some(pb);
    }

    fn on_agent_complete(&self, agent: &AgentKind, success: bool) {
        if let Some(pb) = self.phase_bar.lock().unwrap().as_ref() {
            let status = if success {
                format!("{} {}", "v".green(), agent.profile().display_name)
            } else {
                format!("{} {}", "x".red(), agent.profile().display_name)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, phase: ConsultationPhase) {
        if let Some(pb) = self.phase_bar.lock().unwrap().take() {
            pb.finish_with_message(format!(
                "{} complete!",
                Self::phase_short_name(phase).green()
            ));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ConsultationProgress for SimpleProgress {
    fn on_phase_start(&self, phase: ConsultationPhase, total_tasks: usize) {
        println!(
            "{} {} ({} tasks)",
            "->".cyan(),
            ProgressReporter::phase_display_name(phase).bold(),
            total_tasks
        );
    }

    fn on_agent_complete(&self, agent: &AgentKind, success: bool) {
        if success {
            println!("  {} {}", "v".green(), agent.profile().display_name);
        } else {
            println!("  {} {}", "x".red(), agent.profile().display_name);
        }
    }

    fn on_phase_complete(&self, phase: ConsultationPhase) {
        println!(
            "{} {} complete",
            "<-".cyan(),
            ProgressReporter::phase_short_name(phase)
        );
    }
}
