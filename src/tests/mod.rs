mod invalid_json;
mod todos;
