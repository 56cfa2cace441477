/*!
 * Collatz Arithmetic
 * The step map and power-of-two helpers used by the chain walkers
 */

mod step;

pub use step::{checked_step, is_power_of_two, power_of_two_exponent, step};
