pub mod big_sqrt;
pub mod liquidity_range;
pub mod tick_math;
