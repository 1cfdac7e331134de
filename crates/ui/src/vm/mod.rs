mod quiz_intent;
mod quiz_vm;

pub use quiz_intent::{CountInput, QuizIntent};
pub use quiz_vm::{
    ButtonVm, FormVm, NoticeTone, NoticeVm, OptionVm, QuestionResultVm, QuestionVm, QuizVm,
    ScoreVm, render,
};
