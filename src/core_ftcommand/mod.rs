// Here's the list of the transfer commands implemented
pub mod get;
pub mod list;

// Command parsing and the per-request dispatch live here
pub mod ftcommand;
pub mod handlers;
