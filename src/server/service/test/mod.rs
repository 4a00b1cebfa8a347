mod activity;
mod category;
mod recommendation;
mod schedule;
mod user;
