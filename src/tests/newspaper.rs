use crate::{DispatchResult, StringSubject, Subscriber, SubscriptionId};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone)]
struct Newspaper {
    news: String,
}

impl Newspaper {
    fn new(news: &str) -> Self {
        Self {
            news: news.to_string(),
        }
    }
}

type Publisher = StringSubject<Newspaper>;

struct Reader {
    subscriber: Subscriber<String, Newspaper>,
    messages_received: u32,
    time_read: u32,
    weather_read: u32,
    last_headline: Option<String>,
    free_function_called: bool,
}

impl Reader {
    fn new(publisher: &Rc<Publisher>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            subscriber: Subscriber::new(publisher),
            messages_received: 0,
            time_read: 0,
            weather_read: 0,
            last_headline: None,
            free_function_called: false,
        }))
    }

    fn read_time(&mut self, paper: &Newspaper) {
        self.time_read += 1;
        self.messages_received += 1;
        self.last_headline = Some(paper.news.clone());
    }

    fn read_weather(&mut self, paper: &Newspaper) {
        self.weather_read += 1;
        self.messages_received += 1;
        self.last_headline = Some(paper.news.clone());
    }
}

fn subscribe_method(
    reader: &Rc<RefCell<Reader>>,
    topic: &str,
    method: fn(&mut Reader, &Newspaper),
) -> SubscriptionId {
    reader
        .borrow_mut()
        .subscriber
        .subscribe_method(topic, reader, method)
        .expect("publisher is alive")
}

#[test]
fn unsubscribed_reader_receives_nothing() {
    let publisher = Publisher::shared();
    let reader = Reader::new(&publisher);

    let result = publisher.notify("TIME", &Newspaper::new("Breaking news"));

    assert_eq!(result, DispatchResult::TopicNotFound);
    assert_eq!(reader.borrow().messages_received, 0);
}

#[test]
fn reader_receives_only_subscribed_topics() {
    let publisher = Publisher::shared();
    let reader = Reader::new(&publisher);
    let time = subscribe_method(&reader, "TIME", Reader::read_time);
    let weather = subscribe_method(&reader, "WEATHER", Reader::read_weather);
    assert_eq!(time, SubscriptionId::from(0));
    assert_eq!(weather, SubscriptionId::from(1));

    let result = publisher.notify("TIME", &Newspaper::new("Breaking news!"));
    assert_eq!(result, DispatchResult::Dispatched(1));
    {
        let reader = reader.borrow();
        assert_eq!(reader.messages_received, 1);
        assert_eq!(reader.time_read, 1);
        assert_eq!(reader.weather_read, 0);
        assert_eq!(reader.last_headline.as_deref(), Some("Breaking news!"));
    }

    let result = publisher.notify("SPORT", &Newspaper::new("New record..."));
    assert_eq!(result, DispatchResult::TopicNotFound);
    assert_eq!(reader.borrow().messages_received, 1);
}

#[test]
fn reader_unsubscribes_from_both_topics() {
    let publisher = Publisher::shared();
    let reader = Reader::new(&publisher);
    subscribe_method(&reader, "TIME", Reader::read_time);
    subscribe_method(&reader, "WEATHER", Reader::read_weather);

    assert!(reader.borrow_mut().subscriber.unsubscribe(SubscriptionId::from(0)));
    assert!(reader.borrow_mut().subscriber.unsubscribe(SubscriptionId::from(1)));
    assert!(reader.borrow().subscriber.subscriptions().is_empty());

    // emptied topics stay known: found, nothing dispatched
    let result = publisher.notify("TIME", &Newspaper::new("Breaking news"));
    assert_eq!(result, DispatchResult::Dispatched(0));
    assert!(result.is_found());
    assert_eq!(reader.borrow().messages_received, 0);
}

#[test]
fn free_function_and_method_share_a_topic() {
    let publisher = Publisher::shared();
    let reader = Reader::new(&publisher);

    let handle = Rc::downgrade(&reader);
    reader
        .borrow_mut()
        .subscriber
        .subscribe("TIME", move |_: &Newspaper| {
            if let Some(reader) = handle.upgrade() {
                reader.borrow_mut().free_function_called = true;
            }
        })
        .expect("publisher is alive");
    subscribe_method(&reader, "TIME", Reader::read_time);

    let result = publisher.notify("TIME", &Newspaper::new("Breaking news"));

    assert_eq!(result, DispatchResult::Dispatched(2));
    let reader = reader.borrow();
    assert_eq!(reader.messages_received, 1);
    assert_eq!(reader.time_read, 1);
    assert!(reader.free_function_called);
}

#[test]
fn dropped_reader_is_never_invoked_again() {
    let publisher = Publisher::shared();
    let survivor = Reader::new(&publisher);
    subscribe_method(&survivor, "TIME", Reader::read_time);

    {
        let reader = Reader::new(&publisher);
        subscribe_method(&reader, "TIME", Reader::read_time);
        subscribe_method(&reader, "WEATHER", Reader::read_weather);
        assert_eq!(publisher.subscription_count("TIME"), Some(2));
    }

    assert_eq!(publisher.subscription_count("TIME"), Some(1));
    assert_eq!(publisher.subscription_count("WEATHER"), Some(0));
    assert_eq!(
        publisher.notify("TIME", &Newspaper::new("Later edition")),
        DispatchResult::Dispatched(1)
    );
    assert_eq!(survivor.borrow().time_read, 1);
}

#[test]
fn json_payloads_reach_listeners() {
    let publisher = StringSubject::<serde_json::Value>::shared();
    let mut subscriber = Subscriber::new(&publisher);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    subscriber
        .subscribe("sensor_updates", move |value: &serde_json::Value| {
            if let Some(temp) = value["temp"].as_i64() {
                sink.borrow_mut().push(temp);
            }
        })
        .expect("publisher is alive");

    publisher.notify("sensor_updates", &serde_json::json!({ "temp": 25 }));
    publisher.notify("sensor_updates", &serde_json::json!({ "humidity": 40 }));
    publisher.notify("sensor_updates", &serde_json::json!({ "temp": 27 }));

    assert_eq!(*seen.borrow(), vec![25, 27]);
}
