//! Load and save the question library, and import it from the spreadsheet export

use super::{AnswerFormat, Question};
use crate::error::CatalogError;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Load all questions from a JSON array file
pub fn load_questions<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, CatalogError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| CatalogError::io(path, err))?;
    let questions = load_questions_from_reader(BufReader::new(file))?;
    log::info!("Loaded {} questions from {}", questions.len(), path.display());
    Ok(questions)
}

/// Load questions from any reader (e.g., string buffer, network stream)
pub fn load_questions_from_reader<R: Read>(reader: R) -> Result<Vec<Question>, CatalogError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Overwrite the question library file with the whole collection
pub fn save_questions<P: AsRef<Path>>(path: P, questions: &[Question]) -> Result<(), CatalogError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|err| CatalogError::io(path, err))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, questions)?;
    writer.flush().map_err(|err| CatalogError::io(path, err))?;
    log::info!("Wrote {} questions to {}", questions.len(), path.display());
    Ok(())
}

/// Replace every question sharing `question.id` with `question`
///
/// Returns false when no question has that Id; nothing is added.
pub fn replace_question_by_id(questions: &mut [Question], question: Question) -> bool {
    let mut replaced = false;
    for existing in questions.iter_mut().filter(|existing| existing.id == question.id) {
        *existing = question.clone();
        replaced = true;
    }
    replaced
}

/// Parse a comma separated list of multiple choice options, dropping blanks
pub fn parse_answer_values(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from)
        .collect()
}

/// Import questions from the spreadsheet CSV export
///
/// Columns: Id, category, Question_Number, Question_Text, Answer_Format,
/// Answer_Values (semicolon separated), and optionally EMLoading and Decision.
pub fn import_questions_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, CatalogError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| CatalogError::io(path, err))?;
    import_questions_from_reader(file)
}

/// Import questions from any CSV reader
pub fn import_questions_from_reader<R: Read>(reader: R) -> Result<Vec<Question>, CatalogError> {
    let mut csv_reader = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut questions = Vec::new();

    for (line, result) in csv_reader.records().enumerate() {
        let record = result?;
        match row_to_question(&record) {
            Some(question) => questions.push(question),
            // +2: header row and 1-indexed lines
            None => log::warn!("Skipping CSV row {}: Id is not an integer", line + 2),
        }
    }

    Ok(questions)
}

fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}

fn clean_text(value: &str) -> String {
    value.replace('\r', "").trim().to_string()
}

/// Length of the leading run of ASCII digits
fn digit_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Integer at the start of `value`, ignoring trailing text ("12abc" -> 12)
pub(crate) fn leading_integer(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let bytes = value.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = digit_run(&bytes[sign..]);
    if digits == 0 {
        return None;
    }
    value[..sign + digits].parse().ok()
}

/// Decimal at the start of `value`, ignoring trailing text ("1.1 kg" -> 1.1)
pub(crate) fn leading_decimal(value: &str) -> Option<f64> {
    let value = value.trim_start();
    let bytes = value.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_digits = digit_run(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digit_run(&bytes[end + 1..]);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digit_run(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    value[..end].parse().ok()
}

fn row_to_question(record: &StringRecord) -> Option<Question> {
    let id = leading_integer(field(record, 0))?;

    // Unnumbered rows are numbered after their Id
    let question_number = leading_decimal(field(record, 2))
        .filter(|number| number.is_finite() && *number != 0.0)
        .unwrap_or(id as f64);

    let answer_values = clean_text(field(record, 5))
        .split(';')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from)
        .collect();

    let em_loading = leading_decimal(field(record, 6))
        .filter(|loading| loading.is_finite())
        .unwrap_or(0.0)
        .max(0.0);

    let decision = Some(clean_text(field(record, 7))).filter(|text| !text.is_empty());

    Some(Question {
        id,
        category: clean_text(field(record, 1)),
        question_number,
        question_text: clean_text(field(record, 3)),
        answer_format: AnswerFormat::from(clean_text(field(record, 4))),
        answer_values,
        em_loading,
        decision,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_questions_from_reader() {
        let json = r#"[
            {"Id": 1, "category": "Medical", "Question_Number": 1, "Question_Text": "Heart condition?",
             "Answer_Format": "Yes/No", "Answer_Values": [], "EMLoading": 5, "Decision": ""},
            {"Id": 2, "category": "Medical", "Question_Number": 1.1, "Question_Text": "Describe it",
             "Answer_Format": "Open Ended", "Answer_Values": [], "EMLoading": 3, "Decision": "Refer to UW"}
        ]"#;
        let questions = load_questions_from_reader(json.as_bytes()).expect("Failed to load questions");

        assert_eq!(questions.len(), 2);
        assert!(questions[0].is_main());
        assert!(questions[1].is_sub_question_of(1));
        assert_eq!(questions[1].decision_text(), Some("Refer to UW"));
    }

    #[test]
    fn test_load_default_library() {
        let questions = load_questions(crate::config::DEFAULT_QUESTIONS_PATH).expect("Failed to load questions");
        assert_eq!(questions.len(), 9);
        assert_eq!(questions.iter().filter(|q| q.is_main()).count(), 5);
        assert_eq!(questions[4].answer_values.len(), 3);
    }

    #[test]
    fn test_non_array_payload_is_an_error() {
        let result = load_questions_from_reader(r#"{"error": "nope"}"#.as_bytes());
        assert!(matches!(result, Err(CatalogError::Json(_))));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_questions("does/not/exist.json").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }

    #[test]
    fn test_import_csv_rows() {
        let csv = "Id,category,Question_Number,Question_Text,Answer_Format,Answer_Values,EMLoading,Decision\n\
                   1,Medical,1,Any heart condition?,Yes/No,,10,Refer to CMO\n\
                   2,Medical,1.1,Which one?,Multiple Choice,Angina; Arrhythmia ;,4,\n\
                   x,Medical,9,Not a question,Yes/No,,,\n\
                   4,Lifestyle,,Alcohol units per week,Integer,,-2,\r\n";
        let questions = import_questions_from_reader(csv.as_bytes()).expect("Failed to import");

        assert_eq!(questions.len(), 3);

        let heart = &questions[0];
        assert_eq!(heart.answer_format, AnswerFormat::YesNo);
        assert_eq!(heart.em_loading, 10.0);
        assert_eq!(heart.decision.as_deref(), Some("Refer to CMO"));

        let which = &questions[1];
        assert_eq!(which.question_number, 1.1);
        assert_eq!(which.answer_values, vec!["Angina", "Arrhythmia"]);
        assert_eq!(which.decision, None);

        let alcohol = &questions[2];
        assert_eq!(alcohol.question_number, 4.0);
        assert_eq!(alcohol.category, "Lifestyle");
        assert_eq!(alcohol.answer_format, AnswerFormat::Integer);
        assert_eq!(alcohol.em_loading, 0.0);
    }

    #[test]
    fn test_import_accepts_leading_numbers() {
        let csv = "Id,category,Question_Number,Question_Text,Answer_Format,Answer_Values,EMLoading\n\
                   12abc,Medical,1.1 (sub),Details,Open Ended,,7.5 pts\n\
                   13,Medical,n/a,Other,Open Ended,,none\n";
        let questions = import_questions_from_reader(csv.as_bytes()).expect("Failed to import");

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].id, 12);
        assert_eq!(questions[0].question_number, 1.1);
        assert_eq!(questions[0].em_loading, 7.5);
        assert_eq!(questions[1].question_number, 13.0);
        assert_eq!(questions[1].em_loading, 0.0);
    }

    #[test]
    fn test_leading_number_parsing() {
        assert_eq!(leading_integer(" 42"), Some(42));
        assert_eq!(leading_integer("-3x"), Some(-3));
        assert_eq!(leading_integer("1.9"), Some(1));
        assert_eq!(leading_integer("abc"), None);
        assert_eq!(leading_integer("-"), None);

        assert_eq!(leading_decimal("2.25e1 units"), Some(22.5));
        assert_eq!(leading_decimal(".5"), Some(0.5));
        assert_eq!(leading_decimal("3."), Some(3.0));
        assert_eq!(leading_decimal("4e"), Some(4.0));
        assert_eq!(leading_decimal("."), None);
        assert_eq!(leading_decimal(""), None);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("QuestionsLibrary.json");
        let questions = vec![
            Question::new(1, "Medical", 1.0, "Heart condition?", AnswerFormat::YesNo).with_loading(5.0),
            Question::new(2, "Medical", 1.1, "Describe it", AnswerFormat::OpenEnded).with_decision("Refer to UW"),
        ];

        save_questions(&path, &questions).expect("Failed to save questions");
        let loaded = load_questions(&path).expect("Failed to reload questions");
        assert_eq!(loaded, questions);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("missing").join("QuestionsLibrary.json");
        let err = save_questions(&path, &[]).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_save_reports_failed_write() {
        let questions = vec![Question::new(1, "Medical", 1.0, "Heart condition?", AnswerFormat::YesNo)];
        assert!(save_questions("/dev/full", &questions).is_err());
    }

    #[test]
    fn test_replace_question_by_id() {
        let mut questions = vec![
            Question::new(1, "Medical", 1.0, "Old text", AnswerFormat::YesNo),
            Question::new(2, "Medical", 2.0, "Other", AnswerFormat::YesNo),
        ];
        let edited = Question::new(1, "Medical", 1.0, "New text", AnswerFormat::YesNo).with_loading(10.0);

        assert!(replace_question_by_id(&mut questions, edited.clone()));
        assert_eq!(questions[0], edited);
        assert_eq!(questions[1].question_text, "Other");

        let unknown = Question::new(9, "Medical", 9.0, "Nope", AnswerFormat::YesNo);
        assert!(!replace_question_by_id(&mut questions, unknown));
        assert_eq!(questions.len(), 2);
    }

    #[test]
    fn test_parse_answer_values() {
        assert_eq!(parse_answer_values(" Diving, , Aviation ,"), vec!["Diving", "Aviation"]);
        assert!(parse_answer_values("").is_empty());
    }
}
