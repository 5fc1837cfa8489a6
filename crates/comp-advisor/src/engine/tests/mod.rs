mod blended;
mod common;
mod ranker;
mod weighted;
