//! Demo for topic-observer
//!
//! Loads settings, then runs a small newspaper scenario: a reader subscribes
//! to two topics, the publisher notifies, the reader goes away and later
//! notifications no longer reach it.

use std::cell::RefCell;
use std::rc::Rc;

use topic_observer::config::load_config;
use topic_observer::utils::logging;
use topic_observer::{StringSubject, Subscriber};
use tracing::{error, info};

#[derive(Debug)]
struct Edition {
    headline: String,
}

struct Reader {
    name: &'static str,
    subscriber: Subscriber<String, Edition>,
}

impl Reader {
    fn read_time(&mut self, edition: &Edition) {
        info!(reader = self.name, headline = %edition.headline, "read TIME");
    }

    fn read_weather(&mut self, edition: &Edition) {
        info!(reader = self.name, headline = %edition.headline, "read WEATHER");
    }
}

fn main() {
    let _ = dotenvy::dotenv();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            logging::init("info");
            error!("Failed to load configuration: {e}");
            return;
        }
    };
    logging::init(&config.logging.level);

    if let Err(e) = run(config.subject) {
        error!("Demo failed: {e}");
    }
}

fn run(settings: topic_observer::config::SubjectSettings) -> Result<(), topic_observer::ObserverError> {
    let publisher = StringSubject::<Edition>::with_settings(settings).into_shared();

    {
        let reader = Rc::new(RefCell::new(Reader {
            name: "alice",
            subscriber: Subscriber::new(&publisher),
        }));
        let time = reader
            .borrow_mut()
            .subscriber
            .subscribe_method("TIME", &reader, Reader::read_time)?;
        let weather = reader
            .borrow_mut()
            .subscriber
            .subscribe_method("WEATHER", &reader, Reader::read_weather)?;
        info!(%time, %weather, "reader subscribed");

        let result = publisher.notify(
            "TIME",
            &Edition {
                headline: "Breaking news!".to_string(),
            },
        );
        info!(?result, "published TIME");

        let result = publisher.notify(
            "SPORT",
            &Edition {
                headline: "New record...".to_string(),
            },
        );
        info!(?result, "published SPORT");
    }

    let result = publisher.notify(
        "WEATHER",
        &Edition {
            headline: "Sunny".to_string(),
        },
    );
    info!(?result, "published WEATHER after the reader left");

    Ok(())
}
