//! HTTP status mapping for [`ErrorCode`].

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Status the HTTP layer responds with for this code. Anything not
    /// listed is a client mistake and gets 400.
    pub fn http_status(&self) -> StatusCode {
        use ErrorCode::*;
        match self {
            Success => StatusCode::OK,

            NotFound | AccountNotFound | StallNotFound | ReservationNotFound => {
                StatusCode::NOT_FOUND
            }

            // Contended or already-held resources. StallUnavailable and
            // QuotaExceeded are the two conflict outcomes of `reserve`.
            AlreadyExists | AccountEmailExists | StallNameExists | StallReserved
            | StallUnavailable | QuotaExceeded => StatusCode::CONFLICT,

            NotAuthenticated | InvalidCredentials | TokenExpired | TokenInvalid
            | AccountDisabled => StatusCode::UNAUTHORIZED,

            PermissionDenied | StaffRequired | AdminRequired | NotReservationOwner => {
                StatusCode::FORBIDDEN
            }

            // Transient faults, clients may retry.
            NetworkError | TimeoutError => StatusCode::SERVICE_UNAVAILABLE,

            InternalError | DatabaseError | ConfigError => StatusCode::INTERNAL_SERVER_ERROR,

            _ => StatusCode::BAD_REQUEST,
        }
    }
}
