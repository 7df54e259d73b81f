mod dot_graph;
mod model_io;
