use colored::Colorize;
use serde::Serialize;

use crate::output;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

/// A transient message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    pub fn destructive(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }
}

pub trait Notifier {
    fn toast(&self, toast: Toast);
}

/// Prints toasts to the terminal.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn toast(&self, toast: Toast) {
        if output::is_json_output() {
            let json = serde_json::to_string(&toast).unwrap_or_default();
            match toast.variant {
                ToastVariant::Default => println!("{json}"),
                ToastVariant::Destructive => eprintln!("{json}"),
            }
            return;
        }

        match toast.variant {
            ToastVariant::Default => {
                if !output::is_quiet() {
                    println!("{} {}", "✓".green().bold(), toast.description);
                }
            }
            ToastVariant::Destructive => {
                eprintln!("{} {}", "✗".red().bold(), toast.description.red());
            }
        }
    }
}
