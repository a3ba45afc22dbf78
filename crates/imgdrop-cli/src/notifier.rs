use imgdrop_core::{Notification, NotificationLevel, Notifier};

/// Prints notifications as single terminal lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

pub fn format_notification(notification: &Notification) -> String {
    let marker = match notification.level {
        NotificationLevel::Success => "✔",
        NotificationLevel::Warning => "!",
        NotificationLevel::Error => "✘",
    };
    format!("{} [{}] {}", marker, notification.level, notification.message)
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let line = format_notification(&notification);
        match notification.level {
            NotificationLevel::Warning | NotificationLevel::Error => eprintln!("{}", line),
            NotificationLevel::Success => println!("{}", line),
        }
    }
}
