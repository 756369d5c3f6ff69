use std::sync::OnceLock;

use regex::Regex;
use time::{Duration, OffsetDateTime, Time};

use wardsync_api::models::{Action, Device, Intent, ScheduleRequest};

use crate::configs::Classifier;
use crate::errors::ScheduleError;

const GREETING_WORDS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "good morning",
    "good afternoon",
    "good evening",
];
const THANKS_WORDS: &[&str] = &["thanks", "thank you", "thx"];

const ON_WORDS: &[&str] = &["on", "start", "enable", "turn on", "switch on"];
const OFF_WORDS: &[&str] = &["off", "stop", "disable", "turn off", "switch off"];
const INCREASE_WORDS: &[&str] = &["increase", "up", "raise"];
const DECREASE_WORDS: &[&str] = &["decrease", "down", "lower"];

const AC_WORDS: &[&str] = &["ac", "air conditioner", "aircon"];
const TEMPERATURE_WORDS: &[&str] = &["temp", "temperature"];

const GREETING_REPLY: &str = "Hello! How can I help you with the devices?";
const THANKS_REPLY: &str = "You're welcome!";

fn schedule_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(turn on|turn off)\s+(fan|light|ac)\s+at\s+(\d{1,2})(?::(\d{2}))?\s*(am|pm)?")
            .expect("schedule pattern is valid")
    })
}

fn signed_number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"-?\d+").expect("number pattern is valid"))
}

fn absolute_target_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?:to|at)\s+(\d{1,2})").expect("target pattern is valid"))
}

/// Maps a phrase to a canonical intent via an ordered rule list: smalltalk,
/// then a schedule request, then immediate actions. First match wins.
///
/// Pure and deterministic given the phrase, the reference instant and the
/// current setpoint; the setpoint is an explicit input because "set to N"
/// wording emits a relative delta.
pub struct IntentClassifier {
    policy: Classifier,
}

impl IntentClassifier {
    pub fn new(policy: Classifier) -> Self {
        Self { policy }
    }

    pub fn classify(
        &self,
        text: &str,
        now: OffsetDateTime,
        current_temperature: i32,
    ) -> Result<Intent, ScheduleError> {
        let text = text.to_lowercase();
        let words = split_words(&text);

        if let Some(reply) = match_smalltalk(&words) {
            return Ok(Intent::Smalltalk(reply));
        }

        if let Some(request) = match_schedule(&text, now)? {
            return Ok(Intent::Schedule(request));
        }

        Ok(Intent::Actions(self.match_actions(
            &text,
            &words,
            current_temperature,
        )))
    }

    /// Independent per-device checks, in fixed order fan, light, ac,
    /// temperature. A mentioned device with no recognized wording simply
    /// contributes nothing.
    fn match_actions(&self, text: &str, words: &[&str], current_temperature: i32) -> Vec<Action> {
        let mut actions = Vec::new();

        for (device, mentioned) in [
            (Device::Fan, contains_word(words, "fan")),
            (Device::Light, contains_word(words, "light")),
            (Device::Ac, contains_any(words, AC_WORDS)),
        ] {
            if !mentioned {
                continue;
            }

            if contains_any(words, ON_WORDS) {
                actions.push(Action::SetPower { device, on: true });
            } else if contains_any(words, OFF_WORDS) {
                actions.push(Action::SetPower { device, on: false });
            }
        }

        let temperature_context = contains_any(words, TEMPERATURE_WORDS)
            || (self.policy.ac_implies_temperature && contains_any(words, AC_WORDS));

        if temperature_context {
            if let Some(delta) = temperature_delta(text, words, current_temperature) {
                actions.push(Action::AdjustTemperature { delta });
            }
        }

        actions
    }
}

fn match_smalltalk(words: &[&str]) -> Option<String> {
    if contains_any(words, GREETING_WORDS) {
        return Some(GREETING_REPLY.to_string());
    }
    if contains_any(words, THANKS_WORDS) {
        return Some(THANKS_REPLY.to_string());
    }
    None
}

/// Parse a `(turn on|turn off) <device> at <time>` phrase into an absolute
/// fire time. A time that is not strictly after `now` rolls forward one day.
fn match_schedule(
    text: &str,
    now: OffsetDateTime,
) -> Result<Option<ScheduleRequest>, ScheduleError> {
    let Some(captures) = schedule_pattern().captures(text) else {
        return Ok(None);
    };

    let on = &captures[1] == "turn on";
    let device = match &captures[2] {
        "fan" => Device::Fan,
        "light" => Device::Light,
        _ => Device::Ac,
    };

    let mut hour: u8 = captures[3].parse().unwrap_or(u8::MAX);
    let minute: u8 = captures
        .get(4)
        .map_or(0, |m| m.as_str().parse().unwrap_or(u8::MAX));

    match captures.get(5).map(|m| m.as_str()) {
        Some("pm") if hour != 12 => hour += 12,
        Some("am") if hour == 12 => hour = 0,
        _ => {}
    }

    let parsed = Time::from_hms(hour, minute, 0)
        .map_err(|_| ScheduleError::InvalidTime { hour, minute })?;

    let mut fire_at = now.replace_time(parsed);
    if fire_at <= now {
        fire_at += Duration::days(1);
    }

    Ok(Some(ScheduleRequest {
        device,
        on,
        fire_at,
    }))
}

/// Relative setpoint change for a phrase in temperature context. Explicit
/// increase/decrease wording takes the magnitude of any bare number (unit
/// step without one); otherwise an absolute "to/at N" target is turned into
/// a delta against the current setpoint, dropped when zero.
fn temperature_delta(text: &str, words: &[&str], current_temperature: i32) -> Option<i32> {
    let magnitude = signed_number_pattern()
        .find(text)
        .and_then(|m| m.as_str().parse::<i32>().ok());

    if contains_any(words, INCREASE_WORDS) || text.contains('+') {
        return Some(magnitude.map_or(1, i32::abs));
    }
    if contains_any(words, DECREASE_WORDS) || text.contains('-') {
        return Some(-magnitude.map_or(1, i32::abs));
    }

    let target = absolute_target_pattern()
        .captures(text)
        .and_then(|captures| captures[1].parse::<i32>().ok())?;

    let delta = target - current_temperature;
    (delta != 0).then_some(delta)
}

fn split_words(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect()
}

/// Word-boundary containment, so "this" never matches "hi" and "cotton"
/// never matches "on". Multi-word tokens match a consecutive word window.
fn contains_word(words: &[&str], token: &str) -> bool {
    let needle: Vec<&str> = token.split_whitespace().collect();
    match needle.as_slice() {
        [single] => words.contains(single),
        phrase => words.windows(phrase.len()).any(|window| window == phrase),
    }
}

fn contains_any(words: &[&str], tokens: &[&str]) -> bool {
    tokens.iter().any(|token| contains_word(words, token))
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn classifier() -> IntentClassifier {
        IntentClassifier::new(Classifier {
            ac_implies_temperature: true,
        })
    }

    fn classify(text: &str) -> Intent {
        classifier()
            .classify(text, datetime!(2030-05-06 10:00 UTC), 24)
            .unwrap()
    }

    #[test]
    fn test_greeting_and_thanks() {
        assert!(matches!(classify("hello there"), Intent::Smalltalk(_)));
        assert!(matches!(classify("good morning!"), Intent::Smalltalk(_)));

        let Intent::Smalltalk(reply) = classify("thank you so much") else {
            panic!("expected smalltalk");
        };
        assert_eq!(reply, THANKS_REPLY);
    }

    #[test]
    fn test_greeting_requires_word_boundary() {
        // "this" contains "hi" and "cotton" contains "on" only as substrings.
        assert_eq!(classify("this cotton"), Intent::Actions(vec![]));
    }

    #[test]
    fn test_smalltalk_wins_over_actions() {
        assert!(matches!(classify("hello, turn on fan"), Intent::Smalltalk(_)));
    }

    #[test]
    fn test_turn_on_fan() {
        assert_eq!(
            classify("turn on fan"),
            Intent::Actions(vec![Action::SetPower {
                device: Device::Fan,
                on: true,
            }])
        );
    }

    #[test]
    fn test_switch_off_synonyms() {
        assert_eq!(
            classify("please stop the light"),
            Intent::Actions(vec![Action::SetPower {
                device: Device::Light,
                on: false,
            }])
        );
    }

    #[test]
    fn test_air_conditioner_aliases() {
        for phrase in ["switch on the ac", "turn on air conditioner", "enable aircon"] {
            assert_eq!(
                classify(phrase),
                Intent::Actions(vec![Action::SetPower {
                    device: Device::Ac,
                    on: true,
                }]),
                "phrase: {phrase}"
            );
        }
    }

    #[test]
    fn test_multiple_devices_in_check_order() {
        assert_eq!(
            classify("turn on the light and the fan"),
            Intent::Actions(vec![
                Action::SetPower {
                    device: Device::Fan,
                    on: true,
                },
                Action::SetPower {
                    device: Device::Light,
                    on: true,
                },
            ])
        );
    }

    #[test]
    fn test_device_without_recognized_wording_is_skipped() {
        assert_eq!(classify("the fan is loud"), Intent::Actions(vec![]));
    }

    #[test]
    fn test_increase_with_magnitude() {
        assert_eq!(
            classify("increase temperature by 3"),
            Intent::Actions(vec![Action::AdjustTemperature { delta: 3 }])
        );
    }

    #[test]
    fn test_ac_implies_temperature() {
        assert_eq!(
            classify("increase ac by 2"),
            Intent::Actions(vec![Action::AdjustTemperature { delta: 2 }])
        );
    }

    #[test]
    fn test_ac_policy_can_be_disabled() {
        let classifier = IntentClassifier::new(Classifier {
            ac_implies_temperature: false,
        });
        let intent = classifier
            .classify("increase ac by 2", datetime!(2030-05-06 10:00 UTC), 24)
            .unwrap();
        assert_eq!(intent, Intent::Actions(vec![]));
    }

    #[test]
    fn test_decrease_without_number_is_unit_step() {
        assert_eq!(
            classify("lower the temperature"),
            Intent::Actions(vec![Action::AdjustTemperature { delta: -1 }])
        );
    }

    #[test]
    fn test_absolute_target_becomes_delta() {
        assert_eq!(
            classify("set temperature to 27"),
            Intent::Actions(vec![Action::AdjustTemperature { delta: 3 }])
        );
    }

    #[test]
    fn test_absolute_target_equal_to_current_emits_nothing() {
        assert_eq!(classify("set temperature to 24"), Intent::Actions(vec![]));
    }

    #[test]
    fn test_schedule_same_day() {
        let Intent::Schedule(request) = classify("turn on light at 11pm") else {
            panic!("expected schedule");
        };
        assert_eq!(request.device, Device::Light);
        assert!(request.on);
        assert_eq!(request.fire_at, datetime!(2030-05-06 23:00 UTC));
    }

    #[test]
    fn test_schedule_rolls_to_next_day() {
        let intent = classifier()
            .classify("turn on fan at 1am", datetime!(2030-05-06 02:00 UTC), 24)
            .unwrap();
        let Intent::Schedule(request) = intent else {
            panic!("expected schedule");
        };
        assert_eq!(request.fire_at, datetime!(2030-05-07 01:00 UTC));
    }

    #[test]
    fn test_schedule_exactly_now_rolls_forward() {
        let intent = classifier()
            .classify("turn off ac at 10:00am", datetime!(2030-05-06 10:00 UTC), 24)
            .unwrap();
        let Intent::Schedule(request) = intent else {
            panic!("expected schedule");
        };
        assert!(!request.on);
        assert_eq!(request.fire_at, datetime!(2030-05-07 10:00 UTC));
    }

    #[test]
    fn test_meridian_normalization() {
        let Intent::Schedule(request) = classify("turn on light at 12am") else {
            panic!("expected schedule");
        };
        assert_eq!(request.fire_at, datetime!(2030-05-07 00:00 UTC));

        let Intent::Schedule(request) = classify("turn on light at 12pm") else {
            panic!("expected schedule");
        };
        assert_eq!(request.fire_at, datetime!(2030-05-06 12:00 UTC));

        let Intent::Schedule(request) = classify("turn on light at 6:30pm") else {
            panic!("expected schedule");
        };
        assert_eq!(request.fire_at, datetime!(2030-05-06 18:30 UTC));
    }

    #[test]
    fn test_invalid_hour_is_rejected() {
        let result = classifier().classify("turn on fan at 99", datetime!(2030-05-06 10:00 UTC), 24);
        assert_eq!(
            result,
            Err(ScheduleError::InvalidTime {
                hour: 99,
                minute: 0,
            })
        );
    }

    #[test]
    fn test_unrecognized_phrase_is_empty_action_list() {
        assert_eq!(classify("what is the weather"), Intent::Actions(vec![]));
    }

    #[test]
    fn test_unknown_device_tokens_never_yield_actions() {
        for phrase in [
            "turn on heater",
            "switch on the oven",
            "enable ventilator",
            "turn on fans",
        ] {
            assert_eq!(classify(phrase), Intent::Actions(vec![]), "phrase: {phrase}");
        }
    }

    #[test]
    fn test_classification_is_deterministic() {
        let now = datetime!(2030-05-06 10:00 UTC);
        let first = classifier().classify("turn on light at 6pm", now, 24).unwrap();
        let second = classifier().classify("turn on light at 6pm", now, 24).unwrap();
        assert_eq!(first, second);
    }
}
