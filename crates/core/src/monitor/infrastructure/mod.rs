pub mod blocking_tick_driver;
