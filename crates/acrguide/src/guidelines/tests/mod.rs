mod common;
mod lookup;
mod lung;
mod neuro;
mod properties;
mod prostate;
mod routing;
mod scoring;
