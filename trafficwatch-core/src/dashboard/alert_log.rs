use crate::aggregate::AlertEvent;
use std::collections::VecDeque;

/// How many alert messages the dashboard keeps.
pub const MAX_ALERTS: usize = 20;

/// Most recent alert messages, oldest first.
#[derive(Debug, Default)]
pub struct AlertLog {
    messages: VecDeque<String>,
}

impl AlertLog {
    pub fn new() -> Self {
        Self {
            messages: VecDeque::with_capacity(MAX_ALERTS),
        }
    }

    pub fn push(&mut self, alert: &AlertEvent) {
        if self.messages.len() == MAX_ALERTS {
            self.messages.pop_front();
        }
        self.messages.push_back(alert.message.clone());
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
