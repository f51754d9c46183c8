//! Subscription domain entities.

pub mod model;

pub use model::{
    LatestVideo, SubscribedChannel, SubscribedChannelRow, Subscriber, Subscription,
};
