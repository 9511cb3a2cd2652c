//! Fixed user-facing texts (Hebrew).

/// Reply to `/start`.
pub const START: &str = "היי! אני גרוקי. לא מכיר? לא נורא...\n\
                         שלח לי קובץ, ותקבל אותו עם התמונה\n\
                         צריך עזרה? הקלד /help.";

/// Reply to `/help`.
pub const HELP: &str = "הנה מה שאני עושה:\n\
                        1. שלח לי כל קובץ.\n\
                        2. אני אמחק מילים מסוימות באנגלית (מוגדרות מראש) משם הקובץ, גם אם הן חלק ממילה גדולה יותר.\n\
                        3. אני אוסיף לו את התמונה של אולדטאון בטלגרם.\n\
                        4. תקבל את הקובץ בחזרה.\n\
                        יש שאלות? תתאפק.";

/// Sent as soon as a document arrives.
pub const RECEIVED: &str = "קיבלתי את הקובץ, רגע אחד...";

/// Caption used when the thumbnail could not be attached.
pub const NO_THUMBNAIL_CAPTION: &str = "לא הצלחתי להוסיף תמונה, אבל הנה הקובץ שלך.";

/// Caption used on every successfully branded document.
pub const PROMO_CAPTION: &str = "ספריית אולדטאון - https://t.me/OldTownew";

/// Sent when processing a document fails.
pub const PROCESSING_FAILED: &str = "משהו השתבש. תנסה שוב?";

/// Sent when an update fails outside the document pipeline.
pub const UNEXPECTED_ERROR: &str = "אוי, משהו השתבש. תנסה שוב.";
