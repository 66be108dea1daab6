mod common;
mod routing;
mod statistics;
