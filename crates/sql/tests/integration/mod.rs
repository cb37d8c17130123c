mod concurrency;
mod end_to_end;
mod robustness;
