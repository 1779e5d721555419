//! Companion data layer connection

use sunshine_protocol::DataItem;

/// Errors reported by a companion link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Outbound queue is full
    QueueFull,
    /// Message could not be encoded
    Encode,
}

/// Requests the engine makes of the companion connection.
///
/// Calls only enqueue; results come back as `Event::Link` notifications.
pub trait CompanionLink {
    fn connect(&mut self) -> Result<(), LinkError>;

    fn disconnect(&mut self) -> Result<(), LinkError>;

    /// Start receiving change notifications under `path`
    fn add_listener(&mut self, path: &str) -> Result<(), LinkError>;

    fn remove_listener(&mut self, path: &str) -> Result<(), LinkError>;

    /// Publish an item to the companion's data layer
    fn put_data_item(&mut self, item: &DataItem) -> Result<(), LinkError>;
}
