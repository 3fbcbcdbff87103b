pub mod aim_logic;
pub mod geometry;
pub mod levels;
