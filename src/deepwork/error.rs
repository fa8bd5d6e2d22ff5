use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeepWorkError {
    #[error("딥워크가 이미 진행 중입니다")]
    AlreadyActive,
    #[error("진행 중인 딥워크가 없습니다")]
    NotActive,
    #[error("이벤트를 전달하지 못했습니다")]
    EventChannelClosed,
}
