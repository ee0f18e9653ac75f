use crate::models::question::{AnswerOption, Question};
use rand::seq::SliceRandom;
use rand::Rng;

/// 渲染时的选项顺序
///
/// 返回选项的新副本：非顺序模式下每次渲染都重新打乱，顺序模式保持题库顺序。
/// 选项 id 随选项一起移动，所以判分不受展示顺序影响。
pub fn display_options<R: Rng + ?Sized>(
    question: &Question,
    sequential: bool,
    rng: &mut R,
) -> Vec<AnswerOption> {
    let mut options = question.options.clone();
    if !sequential {
        options.shuffle(rng);
    }
    options
}

/// 展示序号：第 0 个显示为 "A"，依次类推
pub fn display_letter(position: usize) -> String {
    u8::try_from(position)
        .ok()
        .filter(|p| *p < 26)
        .map(|p| char::from(b'A' + p).to_string())
        .unwrap_or_else(|| (position + 1).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{OptionId, QuestionKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question() -> Question {
        Question {
            question_text: "Pick".to_string(),
            explanation: String::new(),
            kind: QuestionKind::SingleChoice,
            options: (0..6)
                .map(|i| AnswerOption {
                    id: OptionId(i),
                    text: format!("opt{}", i),
                    is_correct: i == 4,
                })
                .collect(),
            expected_answers: Vec::new(),
        }
    }

    #[test]
    fn test_sequential_keeps_order() {
        let q = question();
        let shown = display_options(&q, true, &mut StdRng::seed_from_u64(9));
        assert_eq!(shown, q.options);
    }

    #[test]
    fn test_shuffle_keeps_identity_and_correctness() {
        let q = question();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..5 {
            let shown = display_options(&q, false, &mut rng);
            assert_eq!(shown.len(), q.options.len());
            for option in &shown {
                let original = q.option(option.id).unwrap();
                assert_eq!(original, option);
            }
        }
        // 原题不受影响
        assert_eq!(q.options[4].id, OptionId(4));
        assert!(q.options[4].is_correct);
    }

    #[test]
    fn test_display_letter() {
        assert_eq!(display_letter(0), "A");
        assert_eq!(display_letter(25), "Z");
        assert_eq!(display_letter(26), "27");
    }
}
