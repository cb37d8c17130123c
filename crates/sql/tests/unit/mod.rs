mod absence;
mod aliasing;
mod subquery_table;
