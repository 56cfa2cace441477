/*!
 * Max Tracker
 * Global best chain shared by all workers
 */

mod max_tracker;

pub use max_tracker::MaxTracker;
