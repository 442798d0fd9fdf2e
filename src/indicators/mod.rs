/**
* filename : mod
* author : HAMA
* date: 2025. 6. 15.
* description:
**/
pub mod moving_averages;
pub mod oscillators;
pub mod volume;

pub use moving_averages::*;
pub use oscillators::*;
pub use volume::*;
