// src/models/question.rs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// One multiple-choice question produced by the completion service.
///
/// Field names on the wire follow the format the prompt asks the model for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = validate_correct_answer))]
pub struct QuizQuestion {
    /// Position of the question within the generated set.
    #[serde(rename = "QuestionId")]
    pub question_id: i64,

    /// The passage of the source text the question is drawn from.
    #[serde(rename = "Comp_body")]
    #[validate(length(min = 1))]
    pub context: String,

    #[serde(rename = "Question")]
    #[validate(length(min = 1))]
    pub question_text: String,

    #[serde(rename = "Opt_1")]
    #[validate(length(min = 1))]
    pub option_1: String,

    #[serde(rename = "Opt_2")]
    #[validate(length(min = 1))]
    pub option_2: String,

    #[serde(rename = "Opt_3")]
    #[validate(length(min = 1))]
    pub option_3: String,

    #[serde(rename = "Opt_4")]
    #[validate(length(min = 1))]
    pub option_4: String,

    /// Literal text of the correct option.
    #[serde(rename = "Correct_answer")]
    #[validate(length(min = 1))]
    pub correct_answer: String,
}

impl QuizQuestion {
    /// The four options in the order the model gave them.
    pub fn options(&self) -> [&str; 4] {
        [
            self.option_1.as_str(),
            self.option_2.as_str(),
            self.option_3.as_str(),
            self.option_4.as_str(),
        ]
    }
}

fn validate_correct_answer(question: &QuizQuestion) -> Result<(), ValidationError> {
    let answer = question.correct_answer.trim();
    if question
        .options()
        .iter()
        .any(|option| option.trim() == answer)
    {
        Ok(())
    } else {
        Err(ValidationError::new("correct_answer_not_an_option"))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> serde_json::Value {
        json!({
            "QuestionId": 1,
            "Comp_body": "Rust was first released in 2015.",
            "Question": "When was Rust 1.0 released?",
            "Opt_1": "2010",
            "Opt_2": "2012",
            "Opt_3": "2015",
            "Opt_4": "2018",
            "Correct_answer": "2015"
        })
    }

    #[test]
    fn deserializes_wire_format() {
        let question: QuizQuestion = serde_json::from_value(sample()).unwrap();

        assert_eq!(question.question_id, 1);
        assert_eq!(question.question_text, "When was Rust 1.0 released?");
        assert_eq!(question.options(), ["2010", "2012", "2015", "2018"]);
        assert!(question.validate().is_ok());
    }

    #[test]
    fn serializes_back_to_wire_keys() {
        let question: QuizQuestion = serde_json::from_value(sample()).unwrap();
        assert_eq!(serde_json::to_value(&question).unwrap(), sample());
    }

    #[test]
    fn extra_keys_are_ignored() {
        let mut value = sample();
        value["Difficulty"] = json!("easy");
        assert!(serde_json::from_value::<QuizQuestion>(value).is_ok());
    }

    #[test]
    fn missing_option_fails_to_deserialize() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("Opt_4");
        assert!(serde_json::from_value::<QuizQuestion>(value).is_err());
    }

    #[test]
    fn answer_must_match_an_option() {
        let mut value = sample();
        value["Correct_answer"] = json!("2021");
        let question: QuizQuestion = serde_json::from_value(value).unwrap();

        let errors = question.validate().unwrap_err();
        assert!(errors.to_string().contains("correct_answer_not_an_option"));
    }

    #[test]
    fn answer_match_ignores_surrounding_whitespace() {
        let mut value = sample();
        value["Correct_answer"] = json!(" 2015 ");
        let question: QuizQuestion = serde_json::from_value(value).unwrap();
        assert!(question.validate().is_ok());
    }

    #[test]
    fn empty_question_text_is_rejected() {
        let mut value = sample();
        value["Question"] = json!("");
        let question: QuizQuestion = serde_json::from_value(value).unwrap();
        assert!(question.validate().is_err());
    }
}
