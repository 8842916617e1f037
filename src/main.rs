mod config;
mod display;
mod engine;
mod models;
mod web;

use crate::display::manager::DisplayManager;
use crate::display::update_loop::display_loop;
use crate::engine::bitmaps::BitmapSet;
use crate::engine::clock::SystemClock;
use crate::engine::host::{HostSignals, SimulatedHost};
use crate::engine::WatchFaceEngine;
use crate::models::events::HostEvent;
use crate::web::api::events::{redraw_events, EventState};
use crate::web::api::frame::{get_frame, get_state};
use crate::web::api::notifications::{
    change_time_zone, set_ambient, set_interruption_filter, set_visibility, tap,
};
use crate::web::api::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use chrono::Local;
use colored::*;
use config::init_config;
use env_logger::Builder;
use log::{debug, error, info, LevelFilter};
use std::future::IntoFuture;
use std::io::Write;
use std::net::SocketAddr;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() {
    // Initialize the logger with a custom format that includes timestamps and colors
    Builder::new()
        .format(|buf, record| {
            // Color based on log level
            let level = match record.level() {
                log::Level::Error => record.level().to_string().red().bold(),
                log::Level::Warn => record.level().to_string().yellow().bold(),
                log::Level::Info => record.level().to_string().green(),
                log::Level::Debug => record.level().to_string().blue(),
                log::Level::Trace => record.level().to_string().purple(),
            };

            // Apply appropriate colors to the message based on level
            let message = match record.level() {
                log::Level::Error => record.args().to_string().red(),
                log::Level::Warn => record.args().to_string().yellow(),
                log::Level::Info => record.args().to_string().normal(),
                log::Level::Debug => record.args().to_string().blue(),
                log::Level::Trace => record.args().to_string().purple(),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                level,
                message
            )
        })
        .filter(None, LevelFilter::Info) // Set default log level to Info
        .parse_env("RUST_LOG") // Allow overriding with RUST_LOG environment variable
        .init();

    info!("Starting Ventus watch face");

    // Initialize configuration
    let face_config = init_config();

    // Validate configuration
    if let Err(errors) = face_config.validate() {
        for error in errors {
            error!("{}", error);
        }
        std::process::exit(1);
    }

    // Missing or broken artwork is fatal
    let bitmaps = match BitmapSet::load(&face_config.background, &face_config.ambient_background)
    {
        Ok(bitmaps) => bitmaps,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let signals = HostSignals::new();
    let engine = WatchFaceEngine::new(
        bitmaps,
        Box::new(SimulatedHost::new(signals.clone())),
        Box::new(SystemClock),
    );
    let event_state = EventState::new(engine.status());
    let display = DisplayManager::new(event_state.clone());
    let (notifications, notification_rx) = mpsc::unbounded_channel();

    let engine_task = tokio::spawn({
        let signals = signals.clone();
        let event_state = event_state.clone();
        async move {
            debug!("Watch face task started");
            display_loop(engine, notification_rx, signals, display, event_state).await;
        }
    });

    // Bring the face up the way a wearable host would
    for event in [
        HostEvent::Start,
        HostEvent::PropertiesChanged {
            low_bit_ambient: face_config.low_bit_ambient,
            burn_in_protection: face_config.burn_in_protection,
        },
        HostEvent::SurfaceSizeChanged {
            width: face_config.width,
            height: face_config.height,
        },
        HostEvent::AmbientModeChanged(face_config.start_ambient),
        HostEvent::VisibilityChanged(true),
    ] {
        let _ = notifications.send(event);
    }

    // Set up signal handlers for clean shutdown
    let notifications_for_shutdown = notifications.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received termination signal, shutting down...");
        // Teardown runs on the watch face task, which cancels the redraw timer
        if notifications_for_shutdown.send(HostEvent::Destroy).is_err() {
            std::process::exit(0);
        }
    }) {
        error!("Error setting Ctrl-C handler: {}", e);
    }

    let app_state = AppState {
        notifications,
        signals,
        event_state,
    };

    let app = Router::new()
        .route("/api/ambient", post(set_ambient))
        .route("/api/visibility", post(set_visibility))
        .route("/api/interruption-filter", post(set_interruption_filter))
        .route("/api/tap", post(tap))
        .route("/api/time-zone", post(change_time_zone))
        .route("/api/state", get(get_state))
        .route("/api/frame.png", get(get_frame))
        .route("/api/events/redraw", get(redraw_events))
        .with_state(app_state);

    let ip_addr = match face_config.interface.parse::<std::net::IpAddr>() {
        Ok(ip_addr) => ip_addr,
        Err(e) => {
            error!("Invalid network interface address: {}", e);
            std::process::exit(1);
        }
    };

    let addr = SocketAddr::from((ip_addr, face_config.port));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to address {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!("Control interface running on http://{}", addr);

    // Whichever ends first ends the process: a server failure, or the watch
    // face finishing its teardown
    tokio::select! {
        result = axum::serve(listener, app).into_future() => {
            if let Err(e) = result {
                error!("Server error: {}", e);
            }
        }
        result = engine_task => {
            if let Err(e) = result {
                error!("Watch face task failed: {}", e);
            }
        }
    }

    info!("Application exiting");
}
