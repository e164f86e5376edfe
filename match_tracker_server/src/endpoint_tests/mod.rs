mod helpers;
mod mocks;

mod matches;
mod subscriptions;
mod tasks;
