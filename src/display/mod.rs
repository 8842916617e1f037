pub mod driver;
pub mod graphics;
pub mod manager;
pub mod renderer;
pub mod update_loop;
