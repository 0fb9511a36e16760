//! Routers for the verification screen

pub mod channel;

pub use channel::ChannelNavigator;
